/// Shortens an address for display, keeping its start and end:
/// `0x1234567890abcdef` becomes `0x123...bcdef` with `max_len` 10.
pub fn shorten_address(address: &str, max_len: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= max_len || max_len < 2 {
        return address.to_string();
    }

    let head = max_len.div_ceil(2);
    let tail = max_len - head;
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();

    format!("{start}...{end}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_addresses_are_untouched() {
        assert_eq!(shorten_address("0xabc", 10), "0xabc");
    }

    #[test]
    fn test_long_addresses_keep_both_ends() {
        assert_eq!(shorten_address("0x1234567890abcdef", 10), "0x123...bcdef");
        assert_eq!(shorten_address("0x1234567890abcdef", 9), "0x123...cdef");
    }
}

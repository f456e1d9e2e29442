#![allow(dead_code)]

use {
    async_trait::async_trait,
    esports_bets::{
        interface::ContractCall,
        types::{TransactionReceipt, TransactionStatus},
        Notifier, Transport, TransportError, TransportResult,
    },
    serde_json::{json, Map, Value},
    std::{
        collections::{HashMap, VecDeque},
        sync::Mutex,
        time::Duration,
    },
};

pub const CONTRACT: &str = "0xc0ffee0000000000000000000000000000000001";
pub const ALICE: &str = "0xa11ce00000000000000000000000000000000001";
pub const BOB: &str = "0xb0b0000000000000000000000000000000000002";

/// In-memory endpoint with scripted answers; records every call it gets.
#[derive(Default)]
pub struct MockTransport {
    reads: Mutex<HashMap<&'static str, Result<Value, String>>>,
    write_result: Mutex<Option<Result<String, String>>>,
    statuses: Mutex<VecDeque<Option<TransactionStatus>>>,
    read_delay: Mutex<Option<Duration>>,
    calls: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_read(&self, function: &'static str, result: Value) -> &Self {
        self.reads.lock().unwrap().insert(function, Ok(result));
        self
    }

    pub fn fail_read(&self, function: &'static str, message: &str) -> &Self {
        self.reads
            .lock()
            .unwrap()
            .insert(function, Err(message.to_string()));
        self
    }

    pub fn fail_write(&self, message: &str) -> &Self {
        *self.write_result.lock().unwrap() = Some(Err(message.to_string()));
        self
    }

    /// Statuses returned by successive polls. Once exhausted the last one
    /// repeats; with none scripted, transactions are accepted right away.
    pub fn with_statuses(&self, statuses: Vec<Option<TransactionStatus>>) -> &Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    /// Reads answer with what was scripted when they started, after `delay`.
    pub fn delay_reads(&self, delay: Duration) -> &Self {
        *self.read_delay.lock().unwrap() = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn rpc_error(message: &str) -> TransportError {
    TransportError::Rpc {
        code: -32000,
        message: message.to_string(),
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn read(
        &self,
        _contract: &str,
        _from: Option<&str>,
        call: &ContractCall,
    ) -> TransportResult<Value> {
        self.record(format!("read:{}", call.function_name()));
        let result = match self.reads.lock().unwrap().get(call.function_name()) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(rpc_error(message)),
            None => Ok(Value::Null),
        };

        let delay = *self.read_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn write(
        &self,
        _contract: &str,
        from: &str,
        call: &ContractCall,
        value: u128,
    ) -> TransportResult<String> {
        self.record(format!("write:{}:{}:{}", call.function_name(), from, value));
        match self.write_result.lock().unwrap().clone() {
            Some(Err(message)) => Err(rpc_error(&message)),
            Some(Ok(hash)) => Ok(hash),
            None => Ok("0xtx".to_string()),
        }
    }

    async fn transaction(&self, hash: &str) -> TransportResult<Option<TransactionReceipt>> {
        self.record(format!("poll:{}", hash));

        let status = {
            let mut statuses = self.statuses.lock().unwrap();
            match statuses.len() {
                0 => Some(TransactionStatus::Accepted),
                1 => statuses[0].clone(),
                _ => statuses.pop_front().flatten(),
            }
        };

        Ok(status.map(|status| TransactionReceipt {
            status,
            hash: hash.to_string(),
            block_number: Some(42),
            extra: Map::new(),
        }))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<(String, String, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn titles(&self, kind: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|(event_kind, _, _)| event_kind == kind)
            .map(|(_, title, _)| title)
            .collect()
    }

    fn push(&self, kind: &str, title: &str, description: &str) {
        self.events.lock().unwrap().push((
            kind.to_string(),
            title.to_string(),
            description.to_string(),
        ));
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, title: &str, description: &str) {
        self.push("success", title, description);
    }

    fn error(&self, title: &str, description: &str) {
        self.push("error", title, description);
    }

    fn config_error(&self, title: &str, description: &str) {
        self.push("config", title, description);
    }
}

pub fn bet_fields(date: &str, team1: &str, team2: &str, predicted: &str) -> Value {
    json!({
        "game_date": date,
        "team1": team1,
        "team2": team2,
        "predicted_winner": predicted,
        "has_resolved": false,
        "real_winner": "",
        "real_score": "",
        "resolution_url": "",
    })
}

/// Two owners, three bets, in the shape `get_bets` returns.
pub fn sample_bets() -> Value {
    json!({
        ALICE: {
            "0": bet_fields("2025-06-01", "Alpha", "Beta", "1"),
            "1": bet_fields("2025-06-02", "Gamma", "Delta", "0"),
        },
        BOB: {
            "2": bet_fields("2025-06-03", "Omega", "Sigma", "2"),
        },
    })
}

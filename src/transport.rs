use {
    crate::{
        config::REQUEST_TIMEOUT,
        error::{TransportError, TransportResult},
    },
    async_trait::async_trait,
    esports_bets_interface::ContractCall,
    esports_bets_types::TransactionReceipt,
    serde::Deserialize,
    serde_json::{json, Value},
    std::sync::atomic::{AtomicU64, Ordering},
    tracing::debug,
};

/// The RPC endpoint the contract lives behind.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Runs a read-only contract function and returns its raw result.
    async fn read(
        &self,
        contract: &str,
        from: Option<&str>,
        call: &ContractCall,
    ) -> TransportResult<Value>;

    /// Submits a state-changing contract function, returning the transaction hash.
    async fn write(
        &self,
        contract: &str,
        from: &str,
        call: &ContractCall,
        value: u128,
    ) -> TransportResult<String>;

    /// Current view of a submitted transaction, `None` while the endpoint
    /// does not know it yet.
    async fn transaction(&self, hash: &str) -> TransportResult<Option<TransactionReceipt>>;
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 over HTTP.
pub struct HttpTransport {
    endpoint: String,
    http_client: reqwest::Client,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> TransportResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            endpoint: endpoint.into(),
            http_client,
            next_id: AtomicU64::new(1),
        })
    }

    async fn request(&self, method: &str, params: Value) -> TransportResult<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!("-> {} #{}", method, id);

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { status, body });
        }

        let envelope: RpcResponse = response.json().await?;

        if let Some(err) = envelope.error {
            return Err(TransportError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        Ok(envelope.result.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn read(
        &self,
        contract: &str,
        from: Option<&str>,
        call: &ContractCall,
    ) -> TransportResult<Value> {
        let params = json!([{
            "type": "read",
            "to": contract,
            "from": from,
            "function": call.function_name(),
            "args": call.args(),
        }]);

        self.request("gen_call", params).await
    }

    async fn write(
        &self,
        contract: &str,
        from: &str,
        call: &ContractCall,
        value: u128,
    ) -> TransportResult<String> {
        let params = json!([{
            "from": from,
            "to": contract,
            "value": format!("{:#x}", value),
            "function": call.function_name(),
            "args": call.args(),
        }]);

        match self.request("gen_sendTransaction", params).await? {
            Value::String(hash) if !hash.is_empty() => Ok(hash),
            other => Err(TransportError::InvalidResponse(format!(
                "expected a transaction hash, got {other}"
            ))),
        }
    }

    async fn transaction(&self, hash: &str) -> TransportResult<Option<TransactionReceipt>> {
        match self.request("eth_getTransactionByHash", json!([hash])).await? {
            Value::Null => Ok(None),
            raw => serde_json::from_value(raw)
                .map(Some)
                .map_err(|e| TransportError::InvalidResponse(e.to_string())),
        }
    }
}

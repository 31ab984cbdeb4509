#![allow(dead_code)]

use async_trait::async_trait;
use ferrous_rewrite_application::ports::UpstreamForwarder;
use ferrous_rewrite_domain::{DomainError, ZoneConfig};
use hickory_proto::op::Message;
use hickory_proto::rr::{Name, RecordType};
use std::sync::{Arc, Mutex};

/// One call observed by [`MockUpstreamForwarder`].
#[derive(Debug, Clone)]
pub struct ForwardedQuery {
    pub name: String,
    pub record_type: RecordType,
    pub id: u16,
    pub zone: String,
    pub upstream: String,
}

#[derive(Clone)]
pub struct MockUpstreamForwarder {
    response: Arc<Mutex<Option<Result<Message, DomainError>>>>,
    calls: Arc<Mutex<Vec<ForwardedQuery>>>,
}

impl MockUpstreamForwarder {
    pub fn new() -> Self {
        Self {
            response: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(response: Message) -> Self {
        let mock = Self::new();
        mock.set_response(response);
        mock
    }

    pub fn with_error(error: DomainError) -> Self {
        let mock = Self::new();
        *mock.response.lock().unwrap() = Some(Err(error));
        mock
    }

    pub fn set_response(&self, response: Message) {
        *self.response.lock().unwrap() = Some(Ok(response));
    }

    pub fn calls(&self) -> Vec<ForwardedQuery> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockUpstreamForwarder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UpstreamForwarder for MockUpstreamForwarder {
    async fn forward(
        &self,
        name: &Name,
        record_type: RecordType,
        id: u16,
        zone: &ZoneConfig,
    ) -> Result<Message, DomainError> {
        self.calls.lock().unwrap().push(ForwardedQuery {
            name: name.to_ascii(),
            record_type,
            id,
            zone: zone.zone.to_string(),
            upstream: zone.upstream.to_string(),
        });

        match self.response.lock().unwrap().clone() {
            Some(result) => result,
            None => Err(DomainError::TransportTimeout {
                server: zone.upstream.to_string(),
            }),
        }
    }
}

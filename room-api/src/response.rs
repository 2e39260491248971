use std::fmt;

use serde_json::Value;

/// Status the backend answers the accept meeting call with once the room has joined the meeting
pub const ACCEPTED_STATUS: u16 = 202;

/// Which HTTP statuses count as a success for a given call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuccessSignal {
    /// Any 2xx status
    AnySuccess,
    /// Only this exact status, other 2xx statuses included are not a success
    Exactly(u16),
}

impl SuccessSignal {
    pub fn matches(&self, status: u16) -> bool {
        match self {
            SuccessSignal::AnySuccess => (200..300).contains(&status),
            SuccessSignal::Exactly(expected) => *expected == status,
        }
    }
}

/// Outcome of a single call to the room-control backend
#[derive(Debug)]
pub enum RemoteResponse {
    /// The backend answered with the success signal of the call
    Ok(Value),
    /// The backend answered, but not with the success signal of the call
    Unexpected { status: u16, payload: Value },
    /// The call never produced a readable response
    NetworkFailure(anyhow::Error),
}

impl RemoteResponse {
    /// Classifies an answered call against the success signal of the call.
    pub fn classify(status: u16, payload: Value, signal: SuccessSignal) -> Self {
        if signal.matches(status) {
            RemoteResponse::Ok(payload)
        } else {
            RemoteResponse::Unexpected { status, payload }
        }
    }

    pub fn into_result(self) -> Result<Value, RemoteCallFailure> {
        match self {
            RemoteResponse::Ok(payload) => Ok(payload),
            RemoteResponse::Unexpected { status, payload } => {
                Err(RemoteCallFailure::Unexpected { status, payload })
            }
            RemoteResponse::NetworkFailure(err) => Err(RemoteCallFailure::Network(err)),
        }
    }
}

/// Decodes a response body into a payload.
/// JSON bodies keep their structure, anything else is kept verbatim as a string.
pub fn decode_payload(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }

    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_owned()))
}

/// A call to the room-control backend did not succeed
#[derive(Debug)]
pub enum RemoteCallFailure {
    /// The backend answered with a status other than the success signal
    Unexpected { status: u16, payload: Value },
    /// Connection, timeout or body read failure
    Network(anyhow::Error),
}

impl fmt::Display for RemoteCallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteCallFailure::Unexpected { status, payload } => {
                write!(f, "unexpected status {} with payload {}", status, payload)
            }
            RemoteCallFailure::Network(err) => write!(f, "network failure: {:#}", err),
        }
    }
}

impl std::error::Error for RemoteCallFailure {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_any_success_accepts_every_2xx() {
        assert!(SuccessSignal::AnySuccess.matches(200));
        assert!(SuccessSignal::AnySuccess.matches(202));
        assert!(SuccessSignal::AnySuccess.matches(299));
        assert!(!SuccessSignal::AnySuccess.matches(199));
        assert!(!SuccessSignal::AnySuccess.matches(300));
        assert!(!SuccessSignal::AnySuccess.matches(500));
    }

    #[test]
    fn test_exact_signal_rejects_other_2xx() {
        let signal = SuccessSignal::Exactly(ACCEPTED_STATUS);

        assert!(signal.matches(202));
        assert!(!signal.matches(200));
        assert!(!signal.matches(204));
    }

    #[test]
    fn test_classify_keeps_status_and_payload_of_unexpected_answers() {
        let response = RemoteResponse::classify(
            200,
            json!({"message": "ok"}),
            SuccessSignal::Exactly(ACCEPTED_STATUS),
        );

        match response {
            RemoteResponse::Unexpected { status, payload } => {
                assert_eq!(status, 200);
                assert_eq!(payload, json!({"message": "ok"}));
            }
            other => panic!("expected an unexpected response, got {:?}", other),
        }
    }

    #[test]
    fn test_into_result_maps_network_failures() {
        let response = RemoteResponse::NetworkFailure(anyhow::anyhow!("connection refused"));

        let failure = response.into_result().unwrap_err();

        assert!(matches!(failure, RemoteCallFailure::Network(_)));
        assert_eq!(failure.to_string(), "network failure: connection refused");
    }

    #[test]
    fn test_decode_payload() {
        assert_eq!(decode_payload(""), Value::Null);
        assert_eq!(decode_payload(r#"{"status":"ok"}"#), json!({"status": "ok"}));
        assert_eq!(
            decode_payload("Internal Server Error"),
            Value::String("Internal Server Error".into())
        );
    }
}

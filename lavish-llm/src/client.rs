//! Remote Calculator — asks a chat model to do arithmetic.
//!
//! Builds the prompt, issues the chat-completion request with
//! deterministic sampling (temperature 0, tiny output ceiling),
//! retries transient failures with exponential backoff and jitter, and
//! parses the one-line answer back into a typed value.

use std::time::Duration;

use rand::Rng;
use reqwest::blocking::Client;
use serde_json::json;
use thiserror::Error;
use tracing::{info, warn};

use lavish_core::config::LavishConfig;
use lavish_core::op::{OpFamily, Operation};
use lavish_core::operand::{Operand, Value};
use lavish_core::{LavishError, NativeGuard, Result, context, with_native};

use crate::prompt::build_prompt;

/// Output-token ceiling: the answer is a number or a word, anything
/// longer is the model editorializing.
const MAX_COMPLETION_TOKENS: u32 = 50;

/// What went wrong with a single HTTP attempt. Internal; everything
/// surfaces to callers as [`LavishError::CalculationFailed`].
#[derive(Debug, Error)]
enum RequestError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RequestError {
    /// Rate limits, server errors, and timeouts are worth retrying;
    /// anything else fails immediately.
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(err) => err.is_timeout(),
            Self::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            Self::Malformed(_) => false,
        }
    }
}

/// Produces a result for `(operator, a, b)` by querying the configured
/// chat-completion endpoint, or signals why it couldn't.
pub struct RemoteCalculator {
    http: Client,
}

impl RemoteCalculator {
    /// Create a calculator with a fresh HTTP client.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Ask the model.
    ///
    /// # Errors
    /// - `LavishError::Configuration` when no API key is configured
    /// - `LavishError::UnsupportedOperation` when the operator has no
    ///   prompt template
    /// - `LavishError::CalculationFailed` for network failures (after
    ///   retries), non-2xx statuses, and unparseable answers
    pub fn calculate(&self, op: Operation, a: Operand, b: Operand) -> Result<Value> {
        let cfg = context().config();
        let Some(api_key) = cfg.api_key.clone() else {
            return Err(LavishError::Configuration("API key not configured".into()));
        };

        let prompt = build_prompt(op, a, b)?;
        with_native(|| info!("cache miss, asking the model: {prompt}"));

        let text = self.request_with_retry(&cfg, &api_key, &prompt)?;
        parse_response(&text, op, a, b)
    }

    /// Up to `1 + max_retries` attempts; delay before retry `n` is
    /// `base * 2^n + random(0.1..0.5)` seconds. The whole loop runs
    /// under the suppression guard so backoff bookkeeping can never be
    /// intercepted.
    fn request_with_retry(
        &self,
        cfg: &LavishConfig,
        api_key: &str,
        prompt: &str,
    ) -> Result<String> {
        let _guard = NativeGuard::new();
        let mut attempt: u32 = 0;
        loop {
            match self.send(cfg, api_key, prompt) {
                Ok(text) => return Ok(text),
                Err(err) => {
                    if !err.is_retryable() || attempt >= cfg.max_retries {
                        return Err(LavishError::CalculationFailed(err.to_string()));
                    }
                    let delay = cfg.base_delay_secs * f64::powi(2.0, attempt as i32)
                        + rand::thread_rng().gen_range(0.1..0.5);
                    warn!(
                        attempt = attempt + 1,
                        max_retries = cfg.max_retries,
                        "transient LLM failure ({err}), retrying in {delay:.2}s"
                    );
                    std::thread::sleep(Duration::from_secs_f64(delay));
                    attempt += 1;
                }
            }
        }
    }

    /// One chat-completion attempt. Returns the first choice's message
    /// content as plain text.
    fn send(
        &self,
        cfg: &LavishConfig,
        api_key: &str,
        prompt: &str,
    ) -> std::result::Result<String, RequestError> {
        let body = json!({
            "model": cfg.model,
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": MAX_COMPLETION_TOKENS,
            "temperature": 0,
        });

        let resp = self
            .http
            .post(&cfg.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .timeout(Duration::from_millis(cfg.request_timeout_ms))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
                body: resp.text().unwrap_or_default(),
            });
        }

        let payload: serde_json::Value = resp
            .json()
            .map_err(|err| RequestError::Malformed(err.to_string()))?;
        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| RequestError::Malformed("response has no message content".to_string()))
    }
}

impl Default for RemoteCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the model's textual answer according to the operator family.
///
/// Predicates want a case-insensitive "true"/"false"; three-way
/// compare wants an integer (clamped to {-1, 0, 1} — models have
/// opinions); arithmetic wants a number, coerced back to the operand
/// pair's kind.
///
/// # Errors
/// `LavishError::CalculationFailed` when the text is not parseable for
/// the family, or the number cannot be represented in the target kind.
pub fn parse_response(text: &str, op: Operation, a: Operand, b: Operand) -> Result<Value> {
    let trimmed = text.trim();
    match op.family() {
        OpFamily::Predicate => {
            if trimmed.eq_ignore_ascii_case("true") {
                Ok(Value::Bool(true))
            } else if trimmed.eq_ignore_ascii_case("false") {
                Ok(Value::Bool(false))
            } else {
                Err(LavishError::CalculationFailed(format!(
                    "expected 'true' or 'false', got '{trimmed}'"
                )))
            }
        }
        OpFamily::ThreeWay => {
            let raw: i64 = trimmed.parse().map_err(|_| {
                LavishError::CalculationFailed(format!("expected an integer, got '{trimmed}'"))
            })?;
            Ok(Value::Order(raw.clamp(-1, 1) as i8))
        }
        OpFamily::Arithmetic => {
            let raw: f64 = trimmed.parse().map_err(|_| {
                LavishError::CalculationFailed(format!("expected a number, got '{trimmed}'"))
            })?;
            Operand::coerce(raw, op, a, b).map(Value::Num).ok_or_else(|| {
                LavishError::CalculationFailed(format!(
                    "cannot represent {raw} as {}",
                    a.kind()
                ))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use num_rational::Rational64;

    #[test]
    fn integer_answer_stays_integer() {
        let parsed = parse_response("5", Operation::Add, Operand::Int(2), Operand::Int(3));
        assert_eq!(parsed.ok(), Some(Value::Num(Operand::Int(5))));
    }

    #[test]
    fn textual_float_coerces_to_integer_for_int_operands() {
        // "5.0" from the model still means the integer 5.
        let parsed = parse_response("5.0", Operation::Add, Operand::Int(2), Operand::Int(3));
        assert_eq!(parsed.ok(), Some(Value::Num(Operand::Int(5))));
    }

    #[test]
    fn division_always_floats() {
        let parsed = parse_response("3.5", Operation::Div, Operand::Int(7), Operand::Int(2));
        assert_eq!(parsed.ok(), Some(Value::Num(Operand::Float(3.5))));
    }

    #[test]
    fn booleans_are_case_insensitive() {
        let t = parse_response("TRUE", Operation::Eq, Operand::Int(2), Operand::Int(2));
        let f = parse_response("False\n", Operation::Lt, Operand::Int(3), Operand::Int(2));
        assert_eq!(t.ok(), Some(Value::Bool(true)));
        assert_eq!(f.ok(), Some(Value::Bool(false)));
    }

    #[test]
    fn garbage_boolean_is_a_failure() {
        let parsed = parse_response("maybe", Operation::Eq, Operand::Int(2), Operand::Int(2));
        assert!(matches!(parsed, Err(LavishError::CalculationFailed(_))));
    }

    #[test]
    fn three_way_is_clamped() {
        let high = parse_response("7", Operation::Cmp, Operand::Int(9), Operand::Int(1));
        let low = parse_response("-42", Operation::Cmp, Operand::Int(1), Operand::Int(9));
        let zero = parse_response("0", Operation::Cmp, Operand::Int(4), Operand::Int(4));
        assert_eq!(high.ok(), Some(Value::Order(1)));
        assert_eq!(low.ok(), Some(Value::Order(-1)));
        assert_eq!(zero.ok(), Some(Value::Order(0)));
    }

    #[test]
    fn rational_operands_wrap_the_answer() {
        let half = Operand::Rational(Rational64::new(1, 2));
        let parsed = parse_response("0.75", Operation::Add, half, half);
        assert_eq!(
            parsed.ok(),
            Some(Value::Num(Operand::Rational(Rational64::new(3, 4))))
        );
    }

    #[test]
    fn complex_operands_wrap_the_answer() {
        let c = Operand::Complex(Complex64::new(1.0, 0.0));
        let parsed = parse_response("2", Operation::Add, c, c);
        assert_eq!(
            parsed.ok(),
            Some(Value::Num(Operand::Complex(Complex64::new(2.0, 0.0))))
        );
    }

    #[test]
    fn unparseable_number_is_a_failure() {
        let parsed = parse_response("banana", Operation::Add, Operand::Int(2), Operand::Int(3));
        assert!(matches!(parsed, Err(LavishError::CalculationFailed(_))));
    }
}

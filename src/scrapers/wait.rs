use anyhow::Result;
use headless_chrome::util::Wait;
use std::time::Duration;

/// Poll `condition` every `interval` until it holds or `timeout` elapses.
///
/// Returns `Ok(false)` on timeout; errors from the condition stop polling.
pub fn poll_until<F>(timeout: Duration, interval: Duration, mut condition: F) -> Result<bool>
where
    F: FnMut() -> Result<bool>,
{
    let outcome = Wait::new(timeout, interval).until(|| match condition() {
        Ok(true) => Some(Ok(())),
        Ok(false) => None,
        Err(e) => Some(Err(e)),
    });

    match outcome {
        Ok(Ok(())) => Ok(true),
        Ok(Err(e)) => Err(e),
        Err(_timeout) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::time::Instant;

    #[test]
    fn test_returns_once_condition_holds() {
        let mut calls = 0;
        let met = poll_until(Duration::from_secs(5), Duration::from_millis(1), || {
            calls += 1;
            Ok(calls == 3)
        })
        .unwrap();

        assert!(met);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_times_out() {
        let start = Instant::now();
        let met = poll_until(Duration::from_millis(30), Duration::from_millis(5), || Ok(false))
            .unwrap();

        assert!(!met);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_condition_checked_at_least_once() {
        let met = poll_until(Duration::ZERO, Duration::from_millis(5), || Ok(true)).unwrap();
        assert!(met);
    }

    #[test]
    fn test_condition_error_propagates() {
        let result = poll_until(Duration::from_secs(1), Duration::from_millis(1), || {
            bail!("tab crashed")
        });
        assert_eq!(result.unwrap_err().to_string(), "tab crashed");
    }
}

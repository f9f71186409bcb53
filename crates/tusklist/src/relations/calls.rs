use std::future::Future;

use tokio_util::sync::CancellationToken;

/// Cancellation scope for every network call a list makes.
///
/// Calls run through [`CallGroup::run`]. Cancelling the group (explicitly,
/// or by dropping it) resolves every pending call to `None` at once, and any
/// call started afterwards resolves to `None` immediately.
#[derive(Debug, Default)]
pub struct CallGroup {
    token: CancellationToken,
}

impl CallGroup {
    /// Create an open group
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `call` unless the group is cancelled first
    pub async fn run<F: Future>(&self, call: F) -> Option<F::Output> {
        if self.token.is_cancelled() {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            output = call => Some(output),
        }
    }

    /// Cancel every call in the group
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the group has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for CallGroup {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn runs_calls_while_open() {
        let group = CallGroup::new();
        assert_eq!(group.run(async { 7 }).await, Some(7));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_pending_calls() {
        let group = CallGroup::new();
        let pending = group.run(tokio::time::sleep(Duration::from_secs(60)));
        let cancel = async {
            tokio::task::yield_now().await;
            group.cancel();
        };
        let (result, ()) = tokio::join!(pending, cancel);
        assert_eq!(result, None);
        assert!(group.is_cancelled());
        assert_eq!(group.run(async { 1 }).await, None);
    }
}

#[cfg(test)]
mod tests {
    use crate::context::{Interrupted, RequestContext};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    #[tokio::test]
    async fn test_run_returns_output_when_not_interrupted() {
        let ctx = RequestContext::new();
        assert_eq!(ctx.run(async { 42 }).await, Ok(42));
    }

    #[tokio::test]
    async fn test_run_fails_fast_on_cancelled_context() {
        let ctx = RequestContext::new();
        ctx.cancel();
        assert_eq!(ctx.check(), Err(Interrupted::Cancelled));
        assert_eq!(ctx.run(async { 1 }).await, Err(Interrupted::Cancelled));
    }

    #[tokio::test]
    async fn test_cancelling_parent_token_stops_pending_work() {
        let token = CancellationToken::new();
        let ctx = RequestContext::new().with_token(token.clone());

        let handle = tokio::spawn(async move {
            ctx.run(std::future::pending::<()>()).await
        });
        token.cancel();

        assert_eq!(handle.await.unwrap(), Err(Interrupted::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_slow_work() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(50));
        let slow = tokio::time::sleep(Duration::from_secs(10));

        assert_eq!(ctx.run(slow).await, Err(Interrupted::DeadlineExceeded));
        assert_eq!(ctx.check(), Err(Interrupted::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_work_finishing_before_deadline_succeeds() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(1));
        let quick = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            "done"
        };
        assert_eq!(ctx.run(quick).await, Ok("done"));
    }
}

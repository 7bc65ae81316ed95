/// Evaluates `$block` and logs the elapsed wall-clock time under `$label`.
#[macro_export]
macro_rules! timer_debug {
    ($label:expr, $block:expr) => {{
        let started_at = jiff::Timestamp::now();
        let result = $block;
        let elapsed = jiff::Timestamp::now().duration_since(started_at);

        tracing::debug!(elapsed = ?elapsed, "{}", $label);

        result
    }};
}

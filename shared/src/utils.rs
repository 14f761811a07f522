// Formatting helpers shared by the engine service and the CLI output.

/// Renders a reward/risk ratio the way traders read it, e.g. `1:2.42`.
pub fn format_risk_reward(ratio: f64) -> String {
    if !ratio.is_finite() {
        return "1:-".to_string();
    }
    format!("1:{:.2}", ratio)
}

/// Rounds to a fixed number of decimals for display.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

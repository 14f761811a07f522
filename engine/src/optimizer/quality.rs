// Signal quality (0-100) to target multiplier
pub fn quality_multiplier(score: f64) -> f64 {
    if score >= 90.0 {
        1.3
    } else if score >= 80.0 {
        1.2
    } else if score >= 70.0 {
        1.1
    } else if score >= 60.0 {
        1.0
    } else if score >= 50.0 {
        0.9
    } else {
        0.8
    }
}

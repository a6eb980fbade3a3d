/// Stat-stage multiplier table.
///
/// Stages range from -6 to +6.
/// Negative stages: `2 / (2 + |stage|)`
/// Positive stages: `(2 + stage) / 2`
pub fn stage_multiplier(stage: i32) -> f32 {
    let s = stage.clamp(-6, 6);

    if s >= 0 {
        (2.0 + s as f32) / 2.0
    } else {
        2.0 / (2.0 + (-s) as f32)
    }
}

/// Apply a stage to a base stat: `max(1, round(base * multiplier))`.
pub fn effective_stat(base: i32, stage: i32) -> i32 {
    ((base as f32 * stage_multiplier(stage)).round() as i32).max(1)
}

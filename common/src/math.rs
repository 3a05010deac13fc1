pub fn floor_to_int(f: f32) -> i32 {
    (f as f64).floor() as i32
}

/// True if any bit of `flag` is set in `mask`.
pub fn is_flag_set(mask: i32, flag: i32) -> bool {
    (mask & flag) != 0
}

pub fn approach(start: f32, end: f32, shift: f32) -> f32 {
    if start < end {
        return end.min(start + shift);
    }

    end.max(start - shift)
}

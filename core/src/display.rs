use alloc::format;
use alloc::string::String;

/// Largest value a three-digit counter can show.
pub const DISPLAY_MAX: u16 = 999;

/// Smallest value a three-digit counter can show.
pub const DISPLAY_MIN: i32 = -99;

pub fn clamp_display(secs: u16) -> u16 {
    secs.min(DISPLAY_MAX)
}

/// Formats a counter as three characters, clamping to `-99..=999`.
pub fn format_counter(value: i32) -> String {
    let value = value.clamp(DISPLAY_MIN, DISPLAY_MAX.into());
    if value < 0 {
        format!("-{:02}", -value)
    } else {
        format!("{:03}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_pads_and_clamps() {
        assert_eq!(format_counter(7), "007");
        assert_eq!(format_counter(120), "120");
        assert_eq!(format_counter(5000), "999");
        assert_eq!(format_counter(-3), "-03");
        assert_eq!(format_counter(-250), "-99");
    }

    #[test]
    fn clock_never_exceeds_three_digits() {
        assert_eq!(clamp_display(1000), 999);
        assert_eq!(clamp_display(42), 42);
    }
}

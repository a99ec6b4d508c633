/// Formats the label for one frame: prefix followed by the zero-padded
/// frame number. A `pad_width` of 0 prints the bare number; numbers with
/// more digits than `pad_width` print in full rather than truncating.
pub fn format_label(prefix: &str, frame_number: u64, pad_width: u32) -> String {
    format!(
        "{}{:0width$}",
        prefix,
        frame_number,
        width = pad_width as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_padding() {
        assert_eq!(format_label("", 7, 3), "007");
        assert_eq!(format_label("Frame ", 7, 3), "Frame 007");
    }

    #[test]
    fn test_pad_width_zero_is_unpadded() {
        assert_eq!(format_label("", 7, 0), "7");
        assert_eq!(format_label("", 12345, 0), "12345");
    }

    #[test]
    fn test_overflowing_numbers_print_in_full() {
        assert_eq!(format_label("", 1000, 3), "1000");
        assert_eq!(format_label("f", 999, 3), "f999");
    }
}

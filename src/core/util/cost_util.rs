/// Hours used to project an hourly price onto a monthly rate.
pub const HOURS_PER_MONTH: u32 = 730;

pub struct CostUtil;

impl CostUtil {
    /// Fixed-point rendering with six fractional digits, the textual form
    /// every `(timestamp, value)` pair is exchanged in.
    #[inline]
    pub fn format_decimal(value: f64) -> String {
        if value.is_nan() {
            "NaN".to_string()
        } else if value == f64::INFINITY {
            "+Inf".to_string()
        } else if value == f64::NEG_INFINITY {
            "-Inf".to_string()
        } else {
            format!("{:.6}", value)
        }
    }

    #[inline]
    pub fn cost_pair(timestamp: f64, value: f64) -> [String; 2] {
        [Self::format_decimal(timestamp), Self::format_decimal(value)]
    }
}

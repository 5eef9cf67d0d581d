const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Renders elapsed milliseconds as the largest applicable unit breakdown,
/// truncating (not rounding) at each unit boundary. Unit letters follow the
/// product's display language.
pub fn format_uptime(ms: u64) -> String {
    let days = ms / MS_PER_DAY;
    let hours = (ms % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (ms % MS_PER_MINUTE) / MS_PER_SECOND;

    if days > 0 {
        format!("{days}д {hours}ч {minutes}м")
    } else if hours > 0 {
        format!("{hours}ч {minutes}м")
    } else if minutes > 0 {
        format!("{minutes}м {seconds}с")
    } else {
        format!("{seconds}с")
    }
}

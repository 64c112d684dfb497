//! Timezone abbreviation lookup.
//!
//! Feed date strings routinely carry obsolete or regional abbreviations
//! ("JST", "AEST") that standard date parsers cannot resolve on their own.
//! This table maps the common North American, European, and Asia-Pacific
//! abbreviations to IANA zones. Ambiguous abbreviations resolve to one fixed
//! choice: CST/CDT is US Central (not China Standard), IST is India (not
//! Israel or Ireland), AST/ADT is Atlantic Canada (not Arabia).

use chrono_tz::Tz;

/// Look up a timezone abbreviation. Returns `None` for unknown tokens;
/// callers must degrade gracefully rather than abort parsing.
pub fn resolve(abbr: &str) -> Option<Tz> {
    let tz = match abbr {
        "GMT" | "UTC" | "UT" | "Z" => Tz::UTC,
        "EST" | "EDT" => Tz::America__New_York,
        "CST" | "CDT" => Tz::America__Chicago,
        "MST" | "MDT" => Tz::America__Denver,
        "PST" | "PDT" => Tz::America__Los_Angeles,
        "AKST" | "AKDT" => Tz::America__Anchorage,
        "HST" => Tz::Pacific__Honolulu,
        "AST" | "ADT" => Tz::America__Halifax,
        "NST" | "NDT" => Tz::America__St_Johns,
        "WET" | "WEST" => Tz::Europe__Lisbon,
        "BST" => Tz::Europe__London,
        "CET" | "CEST" => Tz::Europe__Paris,
        "EET" | "EEST" => Tz::Europe__Helsinki,
        "MSK" => Tz::Europe__Moscow,
        "IST" => Tz::Asia__Kolkata,
        "PKT" => Tz::Asia__Karachi,
        "ICT" => Tz::Asia__Bangkok,
        "SGT" => Tz::Asia__Singapore,
        "HKT" => Tz::Asia__Hong_Kong,
        "JST" => Tz::Asia__Tokyo,
        "KST" => Tz::Asia__Seoul,
        "AWST" => Tz::Australia__Perth,
        "ACST" | "ACDT" => Tz::Australia__Adelaide,
        "AEST" | "AEDT" => Tz::Australia__Sydney,
        "NZST" | "NZDT" => Tz::Pacific__Auckland,
        _ => return None,
    };
    Some(tz)
}

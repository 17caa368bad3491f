//! Category badge tokens.
//!
//! A closed map from category label to a colour token. Front-ends turn the
//! token into whatever they render with (`badge-<token>` CSS classes in the
//! generated site). Labels outside the map get [`NEUTRAL`].

pub const NEUTRAL: &str = "neutral";

pub fn category_badge(category: &str) -> &'static str {
    match category {
        // Library hub
        "Hub" => "cyan",
        "Sensor" => "emerald",
        "Security" => "rose",
        "Power" => "yellow",
        "Actuator" => "orange",
        "UI" => "purple",
        "Network" => "blue",
        "Control" => "indigo",
        // Project hub
        "Web Server" => "emerald",
        "Sensors" => "teal",
        "Cloud/IoT" => "sky",
        "Power Management" => "amber",
        "Communication" => "blue",
        "Video" => "rose",
        "Data Storage" => "indigo",
        "Home Automation" => "fuchsia",
        _ => NEUTRAL,
    }
}

//! Turns research failures into user-facing troubleshooting text.

/// Troubleshooting advice attached to errors whose text mentions `needle`.
struct Guidance {
    needle: &'static str,
    advice: &'static [&'static str],
}

/// Checked top to bottom; the first matching entry wins.
const GUIDANCE: &[Guidance] = &[
    Guidance {
        needle: "api key",
        advice: &[
            "Ensure API keys are properly configured",
            "Check environment variables",
            "Verify API key permissions",
        ],
    },
    Guidance {
        needle: "timeout",
        advice: &[
            "Research query might be too complex",
            "Try using 'quick' research mode",
            "Consider breaking down the query",
        ],
    },
    Guidance {
        needle: "docker",
        advice: &[
            "Ensure Docker is running",
            "Check docker-compose configuration",
            "Verify research service is healthy",
        ],
    },
];

/// Returns the troubleshooting steps for an error message, if any apply.
///
/// Matching is a case-insensitive substring search.
pub fn troubleshooting_for(error_text: &str) -> Option<&'static [&'static str]> {
    let lowered = error_text.to_lowercase();
    GUIDANCE
        .iter()
        .find(|g| lowered.contains(g.needle))
        .map(|g| g.advice)
}

/// Builds the diagnostic returned in place of a report when research fails.
pub fn describe_failure(error_text: &str) -> String {
    let mut message = format!("Deep research failed: {}", error_text);
    if let Some(advice) = troubleshooting_for(error_text) {
        message.push_str("\n\nTroubleshooting:");
        for step in advice {
            message.push_str("\n- ");
            message.push_str(step);
        }
    }
    message
}

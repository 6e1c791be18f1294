//! Presenter Agent - drives a slide application through a scripting tool host.

mod prompt;

use agent_sdk::{AgentProfile, ParamType, ToolSpec};

/// Agent name used in logs and on the command line.
pub const NAME: &str = "presenter";

/// Tool names exposed by the slide host.
pub mod tools {
    /// Launches the slide application.
    pub const OPEN_KEYNOTE: &str = "open_keynote";
    /// Adds a slide with a blank layout.
    pub const CREATE_BLANK_SLIDE: &str = "create_blank_keynote_slide";
    /// Draws a rectangle shape.
    pub const DRAW_RECTANGLE: &str = "draw_keynote_rectangle";
    /// Adds a text box.
    pub const ADD_TEXT: &str = "add_text_in_keynote";
}

/// Builds the presenter profile.
#[must_use]
pub fn profile() -> AgentProfile {
    let mut profile = AgentProfile::new(NAME, prompt::PERSONA);
    for rule in prompt::RULES {
        profile = profile.with_rule(*rule);
    }
    for example in prompt::EXAMPLES {
        profile = profile.with_example(*example);
    }
    profile.with_default_query(prompt::DEFAULT_QUERY)
}

/// The tool contracts the slide host advertises.
#[must_use]
pub fn tool_specs() -> Vec<ToolSpec> {
    let frame = [
        ("width", ParamType::Integer),
        ("height", ParamType::Integer),
    ];
    vec![
        ToolSpec::with_properties(
            tools::OPEN_KEYNOTE,
            "Opens the Keynote application and brings it to the front.",
            Vec::<(&str, ParamType)>::new(),
        ),
        ToolSpec::with_properties(
            tools::CREATE_BLANK_SLIDE,
            "Creates a new slide with a blank layout in the front document.",
            Vec::<(&str, ParamType)>::new(),
        ),
        ToolSpec::with_properties(
            tools::DRAW_RECTANGLE,
            "Draws a rectangle on the current slide.",
            [("x1", ParamType::Integer), ("y1", ParamType::Integer)]
                .into_iter()
                .chain(frame),
        ),
        ToolSpec::with_properties(
            tools::ADD_TEXT,
            "Adds a text box with the given text on the current slide.",
            [
                ("text", ParamType::String),
                ("x", ParamType::Integer),
                ("y", ParamType::Integer),
            ]
            .into_iter()
            .chain(frame),
        ),
    ]
}

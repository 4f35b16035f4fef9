use serde::Serialize;

pub const MAIN_ACTIONS_BLOCK_ID: &str = "main-actions";
pub const MODAL_TOPIC_SELECT_BLOCK_ID: &str = "modal-topic-select";
pub const MODAL_CALLBACK_ID: &str = "modal-callback";

pub const ACTION_TOGGLE_TEXT: &str = "action-toggle-text";
pub const ACTION_OPEN_MODAL: &str = "action-open-modal";
pub const ACTION_MODAL_TOPIC_SELECT: &str = "action-modal-topic-select";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    PlainText { text: String },
    Mrkdwn { text: String },
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OptionObject {
    pub text: TextObject,
    pub value: String,
}

impl OptionObject {
    fn new(label: &str, value: &str) -> Self {
        Self {
            text: TextObject::plain(label),
            value: value.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    Button {
        action_id: String,
        text: TextObject,
        value: String,
    },
    StaticSelect {
        action_id: String,
        placeholder: TextObject,
        options: Vec<OptionObject>,
        #[serde(skip_serializing_if = "Option::is_none")]
        initial_option: Option<OptionObject>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: TextObject,
    },
    Section {
        text: TextObject,
    },
    Actions {
        block_id: String,
        elements: Vec<Element>,
    },
    Divider,
    Input {
        block_id: String,
        label: TextObject,
        // selection changes are delivered back as block actions
        dispatch_action: bool,
        element: Element,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct HomeTabView {
    #[serde(rename = "type")]
    kind: &'static str,
    blocks: Vec<Block>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ModalView {
    #[serde(rename = "type")]
    kind: &'static str,
    title: TextObject,
    close: TextObject,
    submit: TextObject,
    clear_on_close: bool,
    callback_id: &'static str,
    blocks: Vec<Block>,
}

/// Which variant of the toggled home-tab text to render.
///
/// The state lives entirely in the toggle button's own value: the button
/// always carries the version currently on screen, so clicking it asks for
/// the other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleVersion {
    One,
    Two,
}

impl ToggleVersion {
    /// The version to render after a toggle click carrying `value`.
    pub fn from_button_value(value: &str) -> Self {
        if value == "version-1" {
            Self::Two
        } else {
            Self::One
        }
    }

    fn text(self) -> &'static str {
        match self {
            Self::One => "Version 1 of toggled text!",
            Self::Two => "Version 2 of toggled text!",
        }
    }

    fn button_value(self) -> &'static str {
        match self {
            Self::One => "version-1",
            Self::Two => "version-2",
        }
    }
}

pub fn home_tab(version: ToggleVersion) -> HomeTabView {
    HomeTabView {
        kind: "home",
        blocks: vec![
            Block::Header {
                text: TextObject::plain("Welcome to the Test App :tada:"),
            },
            Block::Section {
                text: TextObject::mrkdwn(
                    "Here's a very short and simple description of this bot! :grin:",
                ),
            },
            Block::Actions {
                block_id: MAIN_ACTIONS_BLOCK_ID.to_string(),
                elements: vec![
                    Element::Button {
                        action_id: ACTION_TOGGLE_TEXT.to_string(),
                        text: TextObject::plain("Toggle Below Text"),
                        value: version.button_value().to_string(),
                    },
                    Element::Button {
                        action_id: ACTION_OPEN_MODAL.to_string(),
                        text: TextObject::plain("Open Modal"),
                        value: "open".to_string(),
                    },
                ],
            },
            Block::Divider,
            Block::Section {
                text: TextObject::mrkdwn(version.text()),
            },
        ],
    }
}

/// The topic-selection modal. When `topic` matches one of the select options,
/// that option is pre-filled and a description line is appended below.
pub fn topic_modal(topic: Option<&str>) -> ModalView {
    let options = vec![
        OptionObject::new("Option 1", "option-1"),
        OptionObject::new("Option 2", "option-2"),
        OptionObject::new("Option 3", "option-3"),
    ];

    let (initial_option, description) = match topic {
        Some("option-1") => (Some(options[0].clone()), Some("You have selected Option 1!")),
        Some("option-2") => (Some(options[1].clone()), Some("You have selected Option 2!")),
        Some("option-3") => (Some(options[2].clone()), Some("You have selected Option 3!")),
        _ => (None, None),
    };

    let mut blocks = vec![Block::Input {
        block_id: MODAL_TOPIC_SELECT_BLOCK_ID.to_string(),
        label: TextObject::plain("Select topic"),
        dispatch_action: true,
        element: Element::StaticSelect {
            action_id: ACTION_MODAL_TOPIC_SELECT.to_string(),
            placeholder: TextObject::plain("Choose one!"),
            options,
            initial_option,
        },
    }];

    if let Some(description) = description {
        blocks.push(Block::Section {
            text: TextObject::plain(description),
        });
    }

    ModalView {
        kind: "modal",
        title: TextObject::plain("Sample Modal"),
        close: TextObject::plain("Close"),
        submit: TextObject::plain("Close - but positive"),
        clear_on_close: true,
        callback_id: MODAL_CALLBACK_ID,
        blocks,
    }
}

/// A single download attempt: the trimmed URL the user submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Raw URL with surrounding whitespace removed
    pub url: String,
}

/// Fabricated video details shown in the modal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeMetadata {
    /// Display title (e.g. "Funny Pet Moments")
    pub title: String,
    /// Clip length (e.g. "15s")
    pub duration: String,
    /// View count (e.g. "523K")
    pub views: String,
}

impl FakeMetadata {
    /// Text for the modal's meta line
    pub fn meta_line(&self) -> String {
        format!("Duration: {} | Views: {}", self.duration, self.views)
    }
}

/// Label of a quality tier the user clicked (e.g. "720p")
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualitySelection(pub String);

impl QualitySelection {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn label(&self) -> &str {
        &self.0
    }
}

/// Transient notification in the top corner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    /// Key used by the dismiss timer
    pub id: u64,
    /// Text shown to the user
    pub message: String,
}

/// Modal dialog state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    /// Open with its metadata and the highlighted tier, if any
    Open {
        metadata: FakeMetadata,
        highlighted: Option<QualitySelection>,
    },
}

/// Everything the window renders
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    /// Current contents of the URL field
    pub input: String,
    /// Download control disabled, spinner visible
    pub loading: bool,
    /// Inline error, at most one
    pub error: Option<String>,
    /// Modal dialog
    pub modal: ModalState,
    /// Stacked toasts, oldest first
    pub toasts: Vec<Toast>,
    /// Next toast id to hand out
    pub next_toast_id: u64,
}

impl ViewState {
    pub fn modal_open(&self) -> bool {
        matches!(self.modal, ModalState::Open { .. })
    }

    pub fn metadata(&self) -> Option<&FakeMetadata> {
        match &self.modal {
            ModalState::Open { metadata, .. } => Some(metadata),
            ModalState::Closed => None,
        }
    }

    pub fn highlighted(&self) -> Option<&QualitySelection> {
        match &self.modal {
            ModalState::Open { highlighted, .. } => highlighted.as_ref(),
            ModalState::Closed => None,
        }
    }
}

use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Badge {
    pub id: Arc<str>,
    pub title: Arc<str>,
    pub description: Arc<str>,
}

impl Badge {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// Granted to every player on first launch
    pub fn began_journey() -> Self {
        Self::new("b0", "Began your journey", "Started the app for the first time")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub points: u64,
    pub username: String,
    /// URI of the picked avatar image
    pub avatar: Option<String>,
    pub badges: Vec<Badge>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            points: 0,
            username: "Player".to_owned(),
            avatar: None,
            badges: vec![Badge::began_journey()],
        }
    }
}

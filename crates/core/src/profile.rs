//! The profile tab: level, XP bar, badges, username and avatar.

use futures_core::future::BoxFuture;
use tracing::info;

use crate::{
    progress::{Badge, ProgressStore},
    rules::GameRules,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelProgress {
    /// Starts at 1
    pub level: u64,
    pub xp_into_level: u64,
    pub level_xp: u64,
}

impl LevelProgress {
    pub fn from_points(points: u64, level_xp: u64) -> Self {
        let level_xp = level_xp.max(1);
        Self {
            level: points / level_xp + 1,
            xp_into_level: points % level_xp,
            level_xp,
        }
    }

    /// Fill of the XP bar, in `0.0..1.0`
    pub fn fraction(&self) -> f64 {
        self.xp_into_level as f64 / self.level_xp as f64
    }

    /// e.g. `20/50 XP to next level`
    pub fn label(&self) -> String {
        format!("{}/{} XP to next level", self.xp_into_level, self.level_xp)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProfileView {
    pub username: String,
    pub avatar: Option<String>,
    pub points: u64,
    pub level: LevelProgress,
    pub badges: Vec<Badge>,
}

impl ProfileView {
    pub fn from_store(store: &ProgressStore, rules: &GameRules) -> Self {
        let player = store.player();
        Self {
            username: player.username.clone(),
            avatar: player.avatar.clone(),
            points: player.points,
            level: LevelProgress::from_points(player.points, rules.level_xp),
            badges: player.badges.clone(),
        }
    }
}

/// The edit-profile dialog. Edits go to a draft until saved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UsernameEditor {
    draft: Option<String>,
}

impl UsernameEditor {
    pub fn open(&mut self, store: &ProgressStore) {
        self.draft = Some(store.player().username.clone());
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&str> {
        self.draft.as_deref()
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        if let Some(draft) = self.draft.as_mut() {
            *draft = text.into();
        }
    }

    /// Commit the draft and close. Returns false if the editor was not open.
    pub fn save(&mut self, store: &mut ProgressStore) -> bool {
        match self.draft.take() {
            Some(name) => {
                info!(username = %name, "username changed");
                store.set_username(name);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickerOptions {
    pub allows_editing: bool,
    /// Crop aspect as width:height
    pub aspect: (u32, u32),
    pub quality: f32,
}

impl PickerOptions {
    pub fn avatar() -> Self {
        Self {
            allows_editing: true,
            aspect: (1, 1),
            quality: 0.7,
        }
    }
}

/// Access to the device photo library
pub trait ImagePicker: Send + Sync {
    /// URI of the picked image, or `None` when the user cancelled
    fn pick_image(&self, options: PickerOptions) -> BoxFuture<'_, Option<String>>;
}

/// Let the player pick a square avatar. A cancelled pick keeps the old one.
pub async fn pick_avatar(picker: &dyn ImagePicker) -> Option<String> {
    picker.pick_image(PickerOptions::avatar()).await
}

/// Pick an avatar and store it. Returns whether the avatar changed.
pub async fn choose_avatar(picker: &dyn ImagePicker, store: &mut ProgressStore) -> bool {
    match pick_avatar(picker).await {
        Some(uri) => {
            info!(%uri, "avatar changed");
            store.set_avatar(Some(uri));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use futures_util::{FutureExt, future};

    use super::*;
    use crate::clock::ManualClock;

    fn store() -> ProgressStore {
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        ProgressStore::new(Arc::new(ManualClock::at_start_of(day)))
    }

    struct FakePicker(Option<&'static str>);

    impl ImagePicker for FakePicker {
        fn pick_image(&self, options: PickerOptions) -> BoxFuture<'_, Option<String>> {
            assert_eq!(options.aspect, (1, 1));
            future::ready(self.0.map(str::to_owned)).boxed()
        }
    }

    #[test]
    fn test_level_math() {
        assert_eq!(
            LevelProgress::from_points(0, 50),
            LevelProgress {
                level: 1,
                xp_into_level: 0,
                level_xp: 50
            }
        );
        assert_eq!(LevelProgress::from_points(49, 50).level, 1);
        assert_eq!(LevelProgress::from_points(50, 50).level, 2);
        assert_eq!(LevelProgress::from_points(50, 50).xp_into_level, 0);

        let progress = LevelProgress::from_points(120, 50);
        assert_eq!(progress.level, 3);
        assert_eq!(progress.label(), "20/50 XP to next level");
        assert!((progress.fraction() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_profile_view() {
        let mut store = store();
        store.add_xp(60);

        let view = ProfileView::from_store(&store, &GameRules::default());
        assert_eq!(view.username, "Player");
        assert_eq!(view.level.level, 2);
        assert_eq!(view.badges.len(), 1);
    }

    #[test]
    fn test_username_editor() {
        let mut store = store();
        let mut editor = UsernameEditor::default();

        editor.edit("ignored while closed");
        assert!(!editor.save(&mut store));

        editor.open(&store);
        assert_eq!(editor.draft(), Some("Player"));
        editor.edit("Robin");
        editor.cancel();
        assert_eq!(store.player().username, "Player");

        editor.open(&store);
        editor.edit("Robin");
        assert!(editor.save(&mut store));
        assert!(!editor.is_open());
        assert_eq!(store.player().username, "Robin");
    }

    #[tokio::test]
    async fn test_choose_avatar() {
        let mut store = store();

        assert!(choose_avatar(&FakePicker(Some("file:///a.jpg")), &mut store).await);
        assert_eq!(store.player().avatar.as_deref(), Some("file:///a.jpg"));

        assert!(!choose_avatar(&FakePicker(None), &mut store).await);
        assert_eq!(store.player().avatar.as_deref(), Some("file:///a.jpg"));
    }
}

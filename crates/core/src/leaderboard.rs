//! Ranking of the local player against a fixed set of sample players.

use std::cmp::Reverse;

use itertools::Itertools;

use crate::progress::ProgressStore;

/// Id of the local player's row
pub const LOCAL_PLAYER_ID: &str = "me";

#[derive(Clone, Copy, Debug)]
struct SamplePlayer {
    id: &'static str,
    name: &'static str,
    points: u64,
    avatar: &'static str,
}

const SAMPLE_PLAYERS: [SamplePlayer; 4] = [
    SamplePlayer {
        id: "1",
        name: "Alice",
        points: 120,
        avatar: "https://i.pravatar.cc/150?img=1",
    },
    SamplePlayer {
        id: "2",
        name: "Bob",
        points: 105,
        avatar: "https://i.pravatar.cc/150?img=2",
    },
    SamplePlayer {
        id: "3",
        name: "Charlie",
        points: 95,
        avatar: "https://i.pravatar.cc/150?img=3",
    },
    SamplePlayer {
        id: "4",
        name: "Diana",
        points: 80,
        avatar: "https://i.pravatar.cc/150?img=4",
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// 1-based
    pub rank: usize,
    pub id: String,
    pub name: String,
    pub points: u64,
    pub avatar: Option<String>,
    pub is_local_player: bool,
}

/// All players, best first. Ties keep the sample players ahead of the local one.
pub fn leaderboard(store: &ProgressStore) -> Vec<LeaderboardEntry> {
    let player = store.player();

    let samples = SAMPLE_PLAYERS.iter().map(|p| LeaderboardEntry {
        rank: 0,
        id: p.id.to_owned(),
        name: p.name.to_owned(),
        points: p.points,
        avatar: Some(p.avatar.to_owned()),
        is_local_player: false,
    });

    let me = LeaderboardEntry {
        rank: 0,
        id: LOCAL_PLAYER_ID.to_owned(),
        name: player.username.clone(),
        points: player.points,
        avatar: player.avatar.clone(),
        is_local_player: true,
    };

    samples
        .chain(std::iter::once(me))
        .sorted_by_key(|entry| Reverse(entry.points))
        .enumerate()
        .map(|(index, entry)| LeaderboardEntry {
            rank: index + 1,
            ..entry
        })
        .collect()
}

use bevy::prelude::*;

use crate::board::Session;

/// Score and high score, shown above the board.
pub struct HudPlugin;

#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
enum ScoreLabel {
    Score,
    HighScore,
}

impl ScoreLabel {
    fn text(self, session: &Session) -> String {
        match self {
            Self::Score => format!("Score: {}", session.score()),
            Self::HighScore => format!("High score: {}", session.high_score()),
        }
    }
}

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup)
            .add_systems(Update, update_scores);
    }
}

fn setup(mut commands: Commands) {
    for (label, justify) in [
        (ScoreLabel::Score, JustifySelf::Start),
        (ScoreLabel::HighScore, JustifySelf::End),
    ] {
        commands.spawn((
            Text::new(""),
            TextFont {
                font_size: 24.0,
                ..default()
            },
            TextColor(Color::BLACK),
            Node {
                position_type: PositionType::Absolute,
                justify_self: justify,
                margin: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            label,
        ));
    }
}

fn update_scores(session: Res<Session>, mut labels: Query<(&ScoreLabel, &mut Text)>) {
    for (label, mut text) in &mut labels {
        let value = label.text(&session);
        if text.0 != value {
            text.0 = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use orb_shell::platform::LocalPlatform;

    use super::*;
    use crate::config::OrbConfig;
    use crate::controller::OrbGame;

    #[test]
    fn labels_show_both_scores() {
        let session = Session(OrbGame::with_rng(
            OrbConfig::default(),
            Box::new(LocalPlatform::in_memory()),
            fastrand::Rng::with_seed(3),
        ));
        assert_eq!(ScoreLabel::Score.text(&session), "Score: 0", "fresh game");
        assert_eq!(
            ScoreLabel::HighScore.text(&session),
            "High score: 0",
            "empty store"
        );
    }
}

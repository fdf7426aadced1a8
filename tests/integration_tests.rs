use serde_json::json;

use tui_2048::config::AppConfig;
use tui_2048::oracle::{resolve_json, ResolveOutput};
use tui_2048::types::{Action, Direction, Position};

#[test]
fn oracle_output_shape() {
    let out = resolve_json("[[2,2,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]", Direction::Left).unwrap();
    let value = serde_json::to_value(&out).unwrap();
    assert_eq!(
        value,
        json!({
            "moved": true,
            "board": [[4,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]],
            "scoreGain": 4,
            "actions": [{
                "type": "merge",
                "line": 0,
                "stay": {"row": 0, "col": 0},
                "absorbed": {"row": 0, "col": 1},
                "to": {"row": 0, "col": 0},
                "value": 4
            }]
        })
    );
}

#[test]
fn oracle_output_round_trips() {
    let out = resolve_json("[[0,0,0,2],[0,0,2,2],[4,0,4,0],[8,8,8,8]]", Direction::Right).unwrap();
    let text = serde_json::to_string(&out).unwrap();
    let back: ResolveOutput = serde_json::from_str(&text).unwrap();
    assert_eq!(back, out);
    assert_eq!(
        out.board,
        vec![
            vec![0, 0, 0, 2],
            vec![0, 0, 0, 4],
            vec![0, 0, 0, 8],
            vec![0, 0, 16, 16]
        ]
    );
    assert_eq!(out.score_gain, 4 + 8 + 32);
}

#[test]
fn move_action_json() {
    let action = Action::Move {
        line: 2,
        from: Position::new(2, 3),
        to: Position::new(2, 0),
        value: 8,
    };
    assert_eq!(
        serde_json::to_value(action).unwrap(),
        json!({
            "type": "move",
            "line": 2,
            "from": {"row": 2, "col": 3},
            "to": {"row": 2, "col": 0},
            "value": 8
        })
    );
}

#[test]
fn oracle_reports_shape_errors() {
    let err = resolve_json("[[2,2,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]", Direction::Up).unwrap_err();
    assert!(err.to_string().contains("invalid board shape"), "{err}");
}

#[test]
fn config_defaults() {
    let config = AppConfig::from_lookup(|_| None);
    assert_eq!(config.seed, None);
    assert!(config.anim_ms > 0);
    assert!(config.log_path.is_none());
}

use tempfile::TempDir;
use trellis_cli::cli::{ArchiveAction, BoardAction, Commands, OutputFormat, TaskAction};
use trellis_cli::config::TrellisConfig;
use trellis_cli::confirm::Confirmation;
use trellis_cli::exit_codes::{EXIT_ERROR, EXIT_WARNING};
use trellis_cli::session::Session;
use trellis_kanban::{BoardId, Destination, Model, Source, TaskId};

fn config_in(dir: &TempDir) -> TrellisConfig {
    TrellisConfig::default().with_overrides(Some(dir.path().join("data")), Some("tester".into()))
}

async fn run(config: &TrellisConfig, format: OutputFormat, command: Commands) -> String {
    let session = Session::open(config, format, false).await.unwrap();
    let mut out = Vec::new();
    session.run(command, &mut out).await.unwrap();
    session.finish().await.unwrap();
    String::from_utf8(out).unwrap()
}

fn stored(config: &TrellisConfig) -> Model {
    let raw = std::fs::read_to_string(config.board_path()).unwrap();
    Model::from_json(&raw).unwrap()
}

#[tokio::test]
async fn test_first_show_saves_defaults() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let out = run(&config, OutputFormat::Table, Commands::Show).await;
    assert!(out.contains("To Do"));

    let model = stored(&config);
    assert_eq!(model.boards.len(), 3);
}

#[tokio::test]
async fn test_add_task_then_move_to_other_board() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let first = stored_after_show(&config).await;
    let from = first.boards[0].id;
    let to = first.boards[1].id;

    let out = run(
        &config,
        OutputFormat::Table,
        Commands::Task {
            action: TaskAction::Add {
                board: from,
                text: "  Ship it  ".into(),
            },
        },
    )
    .await;
    assert!(out.starts_with("Added task ["));
    assert!(out.contains("Ship it"));

    run(
        &config,
        OutputFormat::Json,
        Commands::Move {
            from: Source::Board { id: from, index: 0 },
            to: Some(Destination::Board { id: to, index: 0 }),
        },
    )
    .await;

    let model = stored(&config);
    assert_eq!(model.boards[0].tasks.len(), first.boards[0].tasks.len());
    assert_eq!(model.boards[1].tasks[0].text, "Ship it");
}

async fn stored_after_show(config: &TrellisConfig) -> Model {
    run(config, OutputFormat::Json, Commands::Show).await;
    stored(config)
}

#[tokio::test]
async fn test_trash_drop_archives_and_logs() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let board = BoardId::new(0);
    let text = "Write docs".to_string();
    run(
        &config,
        OutputFormat::Json,
        Commands::Task {
            action: TaskAction::Add {
                board,
                text: text.clone(),
            },
        },
    )
    .await;

    run(
        &config,
        OutputFormat::Table,
        Commands::Move {
            from: Source::Board { id: board, index: 0 },
            to: Some(Destination::Trash),
        },
    )
    .await;

    let out = run(
        &config,
        OutputFormat::Json,
        Commands::Archive {
            action: ArchiveAction::List {
                search: Some("DOCS".into()),
                date: None,
            },
        },
    )
    .await;
    let listing: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["records"][0]["text"], text.as_str());
    assert_eq!(listing["records"][0]["boardId"], i64::from(board));

    let out = run(&config, OutputFormat::Json, Commands::Activity { limit: 5 }).await;
    let entries: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
    assert_eq!(entries[0]["op"], "apply move");
    assert_eq!(entries[0]["actor"], "tester");
    assert_eq!(entries[1]["op"], "add task");
}

#[tokio::test]
async fn test_apply_json_batch() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let input = r#"[
        {"op": "add board", "title": "Later"},
        {"verb": "rename", "noun": "board", "board_id": 0, "title": "Inbox"}
    ]"#;
    run(
        &config,
        OutputFormat::Json,
        Commands::Apply {
            json: Some(input.into()),
            file: None,
        },
    )
    .await;

    let model = stored(&config);
    assert_eq!(model.boards.len(), 4);
    assert_eq!(model.boards[3].title, "Later");
    assert_eq!(model.boards[0].title, "Inbox");
}

#[tokio::test]
async fn test_blank_title_is_a_warning_and_changes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let before = stored_after_show(&config).await;

    let session = Session::open(&config, OutputFormat::Table, false).await.unwrap();
    let mut out = Vec::new();
    let err = session
        .run(
            Commands::Board {
                action: BoardAction::Add { title: "   ".into() },
            },
            &mut out,
        )
        .await
        .unwrap_err();
    session.finish().await.unwrap();

    assert_eq!(err.exit_code, EXIT_WARNING);
    assert!(out.is_empty());
    assert_eq!(stored(&config), before);
}

#[tokio::test]
async fn test_unknown_task_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let session = Session::open(&config, OutputFormat::Table, false)
        .await
        .unwrap()
        .with_confirmation(Confirmation::Assumed);
    let err = session
        .run(
            Commands::Task {
                action: TaskAction::Delete {
                    board: BoardId::new(0),
                    task: TaskId::new(999_999),
                },
            },
            &mut Vec::new(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.exit_code, EXIT_ERROR);
}

#[tokio::test]
async fn test_unconfirmed_delete_is_refused() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let before = stored_after_show(&config).await;

    let session = Session::open(&config, OutputFormat::Table, false).await.unwrap();
    let mut out = Vec::new();
    let err = session
        .run(
            Commands::Board {
                action: BoardAction::Delete {
                    board: before.boards[0].id,
                },
            },
            &mut out,
        )
        .await
        .unwrap_err();
    assert_eq!(err.exit_code, EXIT_WARNING);
    assert!(err.message.contains("--yes"));

    // a batch holding a delete is refused before any of it runs
    let input = r#"[
        {"op": "add board", "title": "Later"},
        {"op": "clear archive"}
    ]"#;
    let err = session
        .run(
            Commands::Apply {
                json: Some(input.into()),
                file: None,
            },
            &mut out,
        )
        .await
        .unwrap_err();
    assert_eq!(err.exit_code, EXIT_WARNING);
    session.finish().await.unwrap();

    assert!(out.is_empty());
    assert_eq!(stored(&config), before);
}

#[tokio::test]
async fn test_confirmed_delete_runs() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let before = stored_after_show(&config).await;
    let doomed = before.boards[0].id;

    let session = Session::open(&config, OutputFormat::Json, false)
        .await
        .unwrap()
        .with_confirmation(Confirmation::Assumed);
    session
        .run(
            Commands::Board {
                action: BoardAction::Delete { board: doomed },
            },
            &mut Vec::new(),
        )
        .await
        .unwrap();
    session.finish().await.unwrap();

    let model = stored(&config);
    assert_eq!(model.boards.len(), before.boards.len() - 1);
    assert!(model.boards.iter().all(|board| board.id != doomed));
}

#[tokio::test]
async fn test_second_session_is_locked_out() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let first = Session::open(&config, OutputFormat::Table, false).await.unwrap();
    let second = Session::open(&config, OutputFormat::Table, false).await;
    let err = match second {
        Ok(_) => panic!("second session should not get the lock"),
        Err(err) => err,
    };
    assert_eq!(err.exit_code, EXIT_ERROR);
    assert!(err.message.contains("in use"));

    first.finish().await.unwrap();
    let third = Session::open(&config, OutputFormat::Table, false).await.unwrap();
    third.finish().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_file_is_left_alone_until_changed() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    std::fs::create_dir_all(&config.data_dir).unwrap();
    std::fs::write(config.board_path(), "{ not json").unwrap();

    let out = run(&config, OutputFormat::Table, Commands::Show).await;
    assert!(out.contains("To Do"));
    assert_eq!(
        std::fs::read_to_string(config.board_path()).unwrap(),
        "{ not json"
    );
}

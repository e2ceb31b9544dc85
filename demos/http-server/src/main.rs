mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use shelf_api::{HttpApi, ServiceApiAdapter, serve};
use shelf_core::{BookService, MemoryStore, SystemClock, TaskService};
use shelf_model::{Book, BookDraft, Task, TaskDraft, TaskStatus};
use shelf_observe::init_logger;

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Config
    let cfg = AppConfig::from_env()?;

    // 2) Logger
    init_logger(&cfg.logger)?;
    info!(format = %cfg.logger.format, level = %cfg.logger.level, "logger initialized");

    // 3) Storage + services
    let clock = Arc::new(SystemClock);
    let tasks = Arc::new(TaskService::new(
        Arc::new(MemoryStore::<Task>::new()),
        clock.clone(),
    ));
    let books = Arc::new(BookService::new(Arc::new(MemoryStore::<Book>::new()), clock));

    if cfg.seed {
        seed(&tasks, &books);
    }

    // 4) HTTP API
    let handler = Arc::new(ServiceApiAdapter::new(tasks, books));
    let router = HttpApi::new(handler)
        .with_base_url(cfg.server.public_base_url())
        .router();

    // 5) Serve until Ctrl+C
    info!("press Ctrl+C to stop");
    serve(&cfg.server, router)
        .await
        .context("http server failed")?;

    Ok(())
}

fn seed(tasks: &TaskService, books: &BookService) {
    let drafts = [
        TaskDraft::new("Tarefa 1").with_status(TaskStatus::Pending),
        TaskDraft::new("Tarefa 2")
            .with_description("Revisar o capítulo 3")
            .with_status(TaskStatus::InProgress),
        TaskDraft::new("Tarefa 3").with_status(TaskStatus::Done),
    ];
    for draft in drafts {
        if let Err(e) = tasks.create(draft) {
            warn!(error = %e, "failed to seed task");
        }
    }

    let book = BookDraft::new("Dom Casmurro", "Machado de Assis", 1899);
    if let Err(e) = books.create(book) {
        warn!(error = %e, "failed to seed book");
    }
    info!("sample records inserted");
}

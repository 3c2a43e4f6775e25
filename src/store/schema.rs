pub const SCHEMA: &str = r#"
-- Pipelines are immutable; new releases are new rows
CREATE TABLE IF NOT EXISTS pipelines (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    repository_uri TEXT NOT NULL,
    version TEXT NOT NULL,
    date_created TEXT DEFAULT (datetime('now')),

    UNIQUE(name, version)
);

-- Bearer tokens, stored verbatim and never deleted
CREATE TABLE IF NOT EXISTS tokens (
    id TEXT PRIMARY KEY,
    token TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('power_user', 'regular_user')),

    -- Scope (regular users only; NULL = no pipeline)
    pipeline_id TEXT REFERENCES pipelines(id),

    date_issued TEXT DEFAULT (datetime('now')),
    date_revoked TEXT,            -- YYYY-MM-DD, NULL = active

    CHECK (role = 'regular_user' OR pipeline_id IS NULL)
);

-- Units of work; one per (pipeline, input)
CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    pipeline_id TEXT NOT NULL REFERENCES pipelines(id),
    task_input_id TEXT NOT NULL,  -- sha256 of canonical task_input
    task_input TEXT NOT NULL,     -- JSON
    status TEXT NOT NULL,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),

    UNIQUE(pipeline_id, task_input_id)
);

-- Status history
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task_id TEXT NOT NULL REFERENCES tasks(id),
    token_id TEXT NOT NULL REFERENCES tokens(id),
    status TEXT NOT NULL,
    change TEXT NOT NULL,
    time TEXT DEFAULT (datetime('now'))
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_pipelines_name ON pipelines(name);
CREATE INDEX IF NOT EXISTS idx_tokens_pipeline ON tokens(pipeline_id);
CREATE INDEX IF NOT EXISTS idx_tasks_pipeline_status ON tasks(pipeline_id, status);
CREATE INDEX IF NOT EXISTS idx_events_task ON events(task_id);
"#;

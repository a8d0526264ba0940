//! SQL schema for the lineage SQLite store.
//!
//! Every table is keyed by the run that wrote it: ids are arena indices and
//! only unique within one run. References between rows of a run are
//! composite foreign keys, so a graph that points at a missing row fails
//! the whole transaction.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS runs (
    run_id      TEXT PRIMARY KEY,
    imported_at TEXT NOT NULL,           -- RFC 3339 UTC
    project     TEXT NOT NULL,
    description TEXT NOT NULL
);

-- ── Provenance ──────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS researchers (
    run_id  TEXT    NOT NULL REFERENCES runs(run_id),
    id      INTEGER NOT NULL,
    name    TEXT    NOT NULL,
    comment TEXT    NOT NULL,
    PRIMARY KEY (run_id, id)
);

CREATE TABLE IF NOT EXISTS projects (
    run_id          TEXT    NOT NULL REFERENCES runs(run_id),
    id              INTEGER NOT NULL,
    name            TEXT    NOT NULL,
    description     TEXT    NOT NULL,
    researcher      INTEGER NOT NULL,
    researcher_role TEXT    NOT NULL,
    scheme_json     TEXT    NOT NULL,    -- JSON SuretyScheme
    PRIMARY KEY (run_id, id),
    FOREIGN KEY (run_id, researcher) REFERENCES researchers(run_id, id)
);

-- ── Vocabularies ────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS event_types (
    run_id TEXT    NOT NULL REFERENCES runs(run_id),
    id     INTEGER NOT NULL,
    name   TEXT    NOT NULL,
    gedcom TEXT,
    PRIMARY KEY (run_id, id)
);

CREATE TABLE IF NOT EXISTS characteristic_part_types (
    run_id       TEXT    NOT NULL REFERENCES runs(run_id),
    id           INTEGER NOT NULL,
    name         TEXT    NOT NULL,
    gedcom       TEXT,
    is_name_part INTEGER NOT NULL,
    PRIMARY KEY (run_id, id)
);

CREATE TABLE IF NOT EXISTS citation_part_types (
    run_id TEXT    NOT NULL REFERENCES runs(run_id),
    id     INTEGER NOT NULL,
    name   TEXT    NOT NULL,
    gedcom TEXT,
    PRIMARY KEY (run_id, id)
);

CREATE TABLE IF NOT EXISTS place_part_types (
    run_id TEXT    NOT NULL REFERENCES runs(run_id),
    id     INTEGER NOT NULL,
    name   TEXT    NOT NULL,
    gedcom TEXT,
    PRIMARY KEY (run_id, id)
);

CREATE TABLE IF NOT EXISTS p2p_types (
    run_id TEXT    NOT NULL REFERENCES runs(run_id),
    id     INTEGER NOT NULL,
    name   TEXT    NOT NULL,
    PRIMARY KEY (run_id, id)
);

-- ── Entities ────────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS places (
    run_id       TEXT    NOT NULL REFERENCES runs(run_id),
    id           INTEGER NOT NULL,
    name         TEXT    NOT NULL,
    parent_place INTEGER,
    PRIMARY KEY (run_id, id),
    FOREIGN KEY (run_id, parent_place) REFERENCES places(run_id, id)
);

CREATE TABLE IF NOT EXISTS personas (
    run_id      TEXT    NOT NULL REFERENCES runs(run_id),
    id          INTEGER NOT NULL,
    name        TEXT    NOT NULL,
    description TEXT    NOT NULL,
    last_change TEXT    NOT NULL,
    PRIMARY KEY (run_id, id)
);

-- Dates are kept three ways: display text, the full JSON DateRange, and the
-- day count of the first date for ordering. All NULL when there is no date.
CREATE TABLE IF NOT EXISTS events (
    run_id     TEXT    NOT NULL REFERENCES runs(run_id),
    id         INTEGER NOT NULL,
    event_type INTEGER NOT NULL,
    name       TEXT    NOT NULL,
    place      INTEGER,
    date_text  TEXT,
    date_json  TEXT,
    date_sort  INTEGER,
    PRIMARY KEY (run_id, id),
    FOREIGN KEY (run_id, event_type) REFERENCES event_types(run_id, id),
    FOREIGN KEY (run_id, place)      REFERENCES places(run_id, id)
);

CREATE TABLE IF NOT EXISTS characteristics (
    run_id    TEXT    NOT NULL REFERENCES runs(run_id),
    id        INTEGER NOT NULL,
    name      TEXT    NOT NULL,
    place     INTEGER,
    date_text TEXT,
    date_json TEXT,
    date_sort INTEGER,
    PRIMARY KEY (run_id, id),
    FOREIGN KEY (run_id, place) REFERENCES places(run_id, id)
);

CREATE TABLE IF NOT EXISTS sources (
    run_id        TEXT    NOT NULL REFERENCES runs(run_id),
    id            INTEGER NOT NULL,
    higher_source INTEGER,
    subject_place INTEGER,
    date_text     TEXT,
    date_json     TEXT,
    date_sort     INTEGER,
    researcher    INTEGER NOT NULL,
    title         TEXT    NOT NULL,
    abbrev        TEXT    NOT NULL,
    biblio        TEXT    NOT NULL,
    comments      TEXT    NOT NULL,
    last_change   TEXT    NOT NULL,
    PRIMARY KEY (run_id, id),
    FOREIGN KEY (run_id, higher_source) REFERENCES sources(run_id, id),
    FOREIGN KEY (run_id, subject_place) REFERENCES places(run_id, id),
    FOREIGN KEY (run_id, researcher)    REFERENCES researchers(run_id, id)
);

CREATE TABLE IF NOT EXISTS repositories (
    run_id TEXT    NOT NULL REFERENCES runs(run_id),
    id     INTEGER NOT NULL,
    name   TEXT    NOT NULL,
    place  INTEGER,
    addr   TEXT,
    info   TEXT    NOT NULL,
    PRIMARY KEY (run_id, id),
    FOREIGN KEY (run_id, place) REFERENCES places(run_id, id)
);

CREATE TABLE IF NOT EXISTS repository_sources (
    run_id      TEXT    NOT NULL REFERENCES runs(run_id),
    repository  INTEGER,
    source      INTEGER NOT NULL,
    call_number TEXT,
    description TEXT,
    medium      TEXT    NOT NULL,    -- 'unknown' | 'book' | 'film' | ...
    FOREIGN KEY (run_id, repository) REFERENCES repositories(run_id, id),
    FOREIGN KEY (run_id, source)     REFERENCES sources(run_id, id)
);

CREATE TABLE IF NOT EXISTS representations (
    run_id    TEXT    NOT NULL REFERENCES runs(run_id),
    id        INTEGER NOT NULL,
    source    INTEGER NOT NULL,
    mime_type TEXT    NOT NULL,
    file      TEXT    NOT NULL,
    comments  TEXT    NOT NULL,
    PRIMARY KEY (run_id, id),
    FOREIGN KEY (run_id, source) REFERENCES sources(run_id, id)
);

-- ── Leaves ──────────────────────────────────────────────────────────────────

CREATE TABLE IF NOT EXISTS place_parts (
    run_id    TEXT    NOT NULL REFERENCES runs(run_id),
    place     INTEGER NOT NULL,
    part_type INTEGER NOT NULL,
    value     TEXT    NOT NULL,
    FOREIGN KEY (run_id, place)     REFERENCES places(run_id, id),
    FOREIGN KEY (run_id, part_type) REFERENCES place_part_types(run_id, id)
);

CREATE TABLE IF NOT EXISTS citation_parts (
    run_id    TEXT    NOT NULL REFERENCES runs(run_id),
    source    INTEGER NOT NULL,
    part_type INTEGER NOT NULL,
    value     TEXT    NOT NULL,
    FOREIGN KEY (run_id, source)    REFERENCES sources(run_id, id),
    FOREIGN KEY (run_id, part_type) REFERENCES citation_part_types(run_id, id)
);

CREATE TABLE IF NOT EXISTS characteristic_parts (
    run_id         TEXT    NOT NULL REFERENCES runs(run_id),
    characteristic INTEGER NOT NULL,
    part_type      INTEGER NOT NULL,
    value          TEXT    NOT NULL,
    FOREIGN KEY (run_id, characteristic) REFERENCES characteristics(run_id, id),
    FOREIGN KEY (run_id, part_type)
        REFERENCES characteristic_part_types(run_id, id)
);

-- Assertions share the claim columns: researcher, surety, source, rationale
-- and last_change.
CREATE TABLE IF NOT EXISTS p2e (
    run_id      TEXT    NOT NULL REFERENCES runs(run_id),
    researcher  INTEGER NOT NULL,
    surety      INTEGER NOT NULL,
    source      INTEGER NOT NULL,
    rationale   TEXT    NOT NULL,
    last_change TEXT    NOT NULL,
    persona     INTEGER NOT NULL,
    event       INTEGER NOT NULL,
    role        TEXT    NOT NULL,    -- 'principal' | 'birth_father' | 'birth_mother'
    FOREIGN KEY (run_id, source)  REFERENCES sources(run_id, id),
    FOREIGN KEY (run_id, persona) REFERENCES personas(run_id, id),
    FOREIGN KEY (run_id, event)   REFERENCES events(run_id, id)
);

CREATE TABLE IF NOT EXISTS p2c (
    run_id         TEXT    NOT NULL REFERENCES runs(run_id),
    researcher     INTEGER NOT NULL,
    surety         INTEGER NOT NULL,
    source         INTEGER NOT NULL,
    rationale      TEXT    NOT NULL,
    last_change    TEXT    NOT NULL,
    persona        INTEGER NOT NULL,
    characteristic INTEGER NOT NULL,
    FOREIGN KEY (run_id, source)         REFERENCES sources(run_id, id),
    FOREIGN KEY (run_id, persona)        REFERENCES personas(run_id, id),
    FOREIGN KEY (run_id, characteristic) REFERENCES characteristics(run_id, id)
);

CREATE TABLE IF NOT EXISTS p2p (
    run_id      TEXT    NOT NULL REFERENCES runs(run_id),
    researcher  INTEGER NOT NULL,
    surety      INTEGER NOT NULL,
    source      INTEGER NOT NULL,
    rationale   TEXT    NOT NULL,
    last_change TEXT    NOT NULL,
    person1     INTEGER NOT NULL,
    person2     INTEGER NOT NULL,
    p2p_type    INTEGER NOT NULL,
    FOREIGN KEY (run_id, source)   REFERENCES sources(run_id, id),
    FOREIGN KEY (run_id, person1)  REFERENCES personas(run_id, id),
    FOREIGN KEY (run_id, person2)  REFERENCES personas(run_id, id),
    FOREIGN KEY (run_id, p2p_type) REFERENCES p2p_types(run_id, id)
);

CREATE INDEX IF NOT EXISTS events_date_idx ON events(run_id, date_sort);
CREATE INDEX IF NOT EXISTS p2e_event_idx   ON p2e(run_id, event);

PRAGMA user_version = 1;
";

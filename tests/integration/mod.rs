/// Integration tests that exercise the server against a real SQLite file
mod workflow;

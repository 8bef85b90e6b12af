//! End-to-end tests of the HTTP API, see the `tests` directory.

//! `meshpick [MESH_PATH]`

use std::fmt::Display;
use std::process::ExitCode;

fn fail(context: &str, error: impl Display) -> ExitCode {
    log::error!("{context}: {error}");
    eprintln!("meshpick: {context}: {error}");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let _ = env_logger::try_init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| meshpick::DEFAULT_MESH.to_string());

    let options = match meshpick::load_options(meshpick::OPTIONS_FILE) {
        Ok(options) => options,
        Err(e) => return fail(meshpick::OPTIONS_FILE, e),
    };
    let mesh = match meshpick::load_mesh(&path) {
        Ok(mesh) => mesh,
        Err(e) => return fail(&path, e),
    };

    match meshpick::run(mesh, options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail("viewer", e),
    }
}

use std::path::Path;

use ort::execution_providers::ExecutionProviderDispatch;
use ort::session::Session;

/// Open an ONNX model with the platform's preferred execution providers.
pub fn load_session(model_path: &Path) -> Result<Session, Box<dyn std::error::Error>> {
    let session = Session::builder()?
        .with_execution_providers(preferred_execution_providers())?
        .commit_from_file(model_path)?;
    log::info!("Loaded ONNX model {}", model_path.display());
    Ok(session)
}

/// Return the preferred ONNX execution providers for the current platform.
///
/// ONNX Runtime falls back to CPU when none of them can be registered.
pub fn preferred_execution_providers() -> Vec<ExecutionProviderDispatch> {
    #[cfg(target_os = "macos")]
    {
        vec![ort::execution_providers::CoreMLExecutionProvider::default().build()]
    }
    #[cfg(target_os = "windows")]
    {
        vec![ort::execution_providers::DirectMLExecutionProvider::default().build()]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        vec![]
    }
}

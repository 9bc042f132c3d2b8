//! Fatal error reporting for the binary

use tracing::error;

/// Print a fatal error and exit with its status code.
///
/// A [`MacroError`](crate::error::MacroError) shows its user message, plus
/// the full cause chain when `verbose >= 1`. Anything else exits with 1.
pub fn handle_fatal_error(error: anyhow::Error, verbose: u8) -> ! {
    use crate::error::MacroError;

    error!("Fatal error: {}", error);

    let exit_code = if let Some(macro_err) = error.downcast_ref::<MacroError>() {
        eprintln!("{}", macro_err.user_message());

        if verbose >= 1 {
            eprintln!("\nContext Chain:\n{}", macro_err.developer_message());
        }

        macro_err.exit_code()
    } else {
        eprintln!("Error: {error}");

        if verbose >= 1 {
            eprintln!("\nError chain:");
            for (i, cause) in error.chain().enumerate() {
                eprintln!("  {}: {}", i, cause);
            }
        }
        1
    };

    std::process::exit(exit_code)
}

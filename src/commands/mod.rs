pub type CmdResult<T> = homeboy::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod assets;
pub mod rename;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        homeboy::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (homeboy::Result<serde_json::Value>, i32) {
    homeboy::tty::status("stackhand is working...");

    match command {
        crate::Commands::Rename(args) => dispatch!(args, global, rename),
        crate::Commands::Assets(args) => dispatch!(args, global, assets),

        // Special case: List is handled in main before dispatch
        crate::Commands::List => {
            let err = homeboy::Error::validation_invalid_argument(
                "output_mode",
                "List command uses raw output mode",
            );
            homeboy::output::map_cmd_result_to_json::<serde_json::Value>(Err(err))
        }
    }
}

use std::any::Any;
use std::panic;

use codesweep::cli::entrypoint::{EntryOptions, run};

fn install_broken_pipe_handler() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let payload = info.payload();
        let is_broken = <dyn Any>::downcast_ref::<&str>(payload)
            .is_some_and(|s| s.contains("Broken pipe"))
            || <dyn Any>::downcast_ref::<String>(payload)
                .is_some_and(|s| s.contains("Broken pipe"));

        if is_broken {
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn main() -> std::io::Result<()> {
    install_broken_pipe_handler();

    run(&EntryOptions {
        binary_name: "codesweep",
        usage: USAGE,
    })
}

const USAGE: &str = "codesweep - Heuristic source-tree quality scanner\n\n\
Same features as `csw`, longer name.\n\n\
Commands:\n  \
  analyze [path]    Run the full analysis pipeline\n  \
  report            Re-render the last analysis result\n  \
  activate <key>    Activate a premium license key\n  \
  status            Show the current license tier\n\n\
Run `codesweep --help` for the full reference.\n";

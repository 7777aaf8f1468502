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
            // Quietly exit when downstream closes the pipe (e.g. piping to `head`).
            std::process::exit(0);
        }

        default_hook(info);
    }));
}

fn main() -> std::io::Result<()> {
    install_broken_pipe_handler();

    run(&EntryOptions {
        binary_name: "csw",
        usage: USAGE,
    })
}

const USAGE: &str = "csw - Heuristic source-tree quality scanner\n\n\
Finds the leftovers that reviews miss: hardcoded secrets, placeholder\n\
data, duplicated code and unguarded API calls.\n\n\
Quick Start:\n  \
  csw analyze                    Analyze the current directory\n  \
  csw analyze src/ -o html       Write an HTML report\n  \
  csw report --format json       Re-render the last run as JSON\n\n\
Commands:\n  \
  analyze [path]    Run the full analysis pipeline\n  \
  report            Re-render the last analysis result\n  \
  activate <key>    Activate a premium license key\n  \
  status            Show the current license tier\n\n\
Common:\n  \
  --ci              Gate CI: exit 1 on errors, 2 on warnings\n  \
  -I, --ignore      Skip extra paths (comma-separated)\n  \
  --verbose         Detailed progress\n\n\
Examples:\n  \
  csw analyze --ci                           # Fail the build on findings\n  \
  csw analyze -I generated,vendor            # Skip generated code\n  \
  csw analyze -o json -f sweep.json          # Machine-readable output\n\n\
More: csw --help\n";

use clap::{CommandFactory, Parser};
use utilkit::utils::{logger, validation::Validate};
use utilkit::{render, CliConfig, Dispatcher, UtilkitConfig, UtilkitError};

fn report(e: &UtilkitError) {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

fn fail(e: &UtilkitError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, exit code {})",
        e,
        e.category(),
        e.exit_code()
    );
    report(e);
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // The logger is not installed yet, so these report without tracing.
    if let Err(e) = cli.validate() {
        report(&e);
        std::process::exit(e.exit_code());
    }

    let settings = match UtilkitConfig::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            report(&e);
            std::process::exit(e.exit_code());
        }
    };

    if cli.log_json {
        logger::init_json_logger(cli.verbose, settings.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level());
    }

    tracing::info!("Starting utilkit");
    tracing::debug!("CLI config: {:?}", cli);

    let dispatcher = Dispatcher::new(settings.call_context());

    let Some(function) = cli.function.as_deref() else {
        CliConfig::command().print_help()?;
        println!();
        print!("{}", dispatcher.help_text(None).unwrap_or_default());
        std::process::exit(2);
    };

    match function {
        "list" => {
            print!("{}", dispatcher.list());
        }
        "help" => match dispatcher.help_text(cli.args.first().map(String::as_str)) {
            Ok(text) => print!("{}", text),
            Err(e) => fail(&e),
        },
        name => match dispatcher.call(name, &cli.args).await {
            Ok(value) => {
                let pretty = settings.output.pretty && !cli.compact;
                match render(&value, pretty) {
                    Ok(text) => println!("{}", text),
                    Err(e) => fail(&e),
                }
            }
            Err(e) => fail(&e),
        },
    }

    Ok(())
}

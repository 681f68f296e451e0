use skitter::commands::command_argument_builder;
use skitter::handlers;

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    match chosen_command.subcommand() {
        Some(("crawl", primary_command)) => handlers::handle_crawl(primary_command).await,
        Some(("dataset", primary_command)) => match primary_command.subcommand() {
            Some(("show", secondary_command)) => handlers::handle_dataset_show(secondary_command),
            _ => unreachable!("clap should ensure we don't get here"),
        },
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

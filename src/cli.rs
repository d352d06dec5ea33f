use clap::{command, Arg, ArgAction, Command, ValueHint};

pub fn build_command() -> Command {
    command!().args([
        Arg::new("config")
            .short('c')
            .long("config-file")
            .alias("config")
            .required(false)
            .value_hint(ValueHint::FilePath)
            .value_name("PATH")
            .help("Path to the YAML config file. Defaults to config.yaml next to the executable."),
        Arg::new("api_key")
            .short('k')
            .long("api-key")
            .alias("key")
            .required(false)
            .value_hint(ValueHint::FilePath)
            .value_name("PATH")
            .help("Path to a file containing a Steam API key. Overrides steam_api_key."),
        Arg::new("steam_id")
            .short('u')
            .long("steam-id")
            .alias("user")
            .required(false)
            .value_name("ID")
            .help("Vanity name, profile URL or numeric ID. Overrides steam_id."),
        Arg::new("output_dir")
            .short('o')
            .long("output-dir")
            .required(false)
            .value_hint(ValueHint::DirPath)
            .value_name("DIR")
            .help("Directory the JSON file is written to. Defaults to ./output."),
        Arg::new("api_base")
            .long("api-base")
            .required(false)
            .hide(true)
            .value_hint(ValueHint::Url)
            .value_name("URL")
            .help("Steam Web API base URL. Defaults to https://api.steampowered.com."),
        Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::SetTrue)
            .help("Print debug output."),
    ])
}

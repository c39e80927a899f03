// SPDX-License-Identifier: MPL-2.0
use iced_uploader::app::{self, Flags};

const HELP: &str = "\
Image uploader

USAGE:
  iced_uploader [OPTIONS] [FILES]...

OPTIONS:
  --lang <ID>           Interface language (en-US, fr, zh-CN)
  --config-dir <PATH>   Directory holding settings.toml
  --upload-dir <PATH>   Directory receiving uploads
  --endpoint <URL>      Upload to this HTTP endpoint instead of a directory
  --max-count <N>       Maximum number of images (0 for unlimited)
  --multiple            Allow several files per selection
  --value <URL>         Already uploaded image (repeatable)
  -h, --help            Print this help
";

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        upload_dir: args.opt_value_from_str("--upload-dir")?,
        endpoint: args.opt_value_from_str("--endpoint")?,
        max_count: args.opt_value_from_str("--max-count")?,
        multiple: args.contains("--multiple"),
        value: args.values_from_str("--value")?,
        files: args
            .finish()
            .into_iter()
            .filter_map(|arg| arg.into_string().ok())
            .collect(),
    };
    Ok(Some(flags))
}

fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    app::run(flags)
}

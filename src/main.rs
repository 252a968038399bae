use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use dom_truncate::models::{Action, DocumentFormat, Job, ReturnMode};
use dom_truncate::run_with_config_path;

/// dom-truncate - усечение текста HTML/XML документа по границам слов и предложений
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Вывести усечённый текст и/или узел, в котором прошёл разрез
    Truncate {
        #[command(flatten)]
        target: Target,
        /// Читать вход как XML вместо HTML
        #[arg(long)]
        xml: bool,
        /// Форма результата: both | text | node
        #[arg(long)]
        return_mode: Option<ReturnMode>,
    },
    /// Вывести HTML, где остаток свёрнут под переключателем
    Collapse {
        #[command(flatten)]
        target: Target,
    },
}

#[derive(clap::Args, Debug)]
struct Target {
    /// Входной документ
    input: PathBuf,
    /// Минимальное число сохраняемых символов
    #[arg(short, long)]
    length: usize,
    /// Корни для обработки (CSS для HTML, имя элемента для XML)
    #[arg(short, long)]
    selector: Option<String>,
    /// Записать результат в файл вместо stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Load environment variables from `.env` file into std::env (optional)
    dotenv().ok();

    // Parse command line arguments
    let args = Args::parse();

    let job = match args.command {
        Command::Truncate { target, xml, return_mode } => Job::builder()
            .action(Action::Truncate)
            .input(target.input)
            .min_length(target.length)
            .maybe_selector(target.selector)
            .format(if xml { DocumentFormat::Xml } else { DocumentFormat::Html })
            .maybe_return_mode(return_mode)
            .maybe_output(target.output)
            .build(),
        Command::Collapse { target } => Job::builder()
            .action(Action::Collapse)
            .input(target.input)
            .min_length(target.length)
            .maybe_selector(target.selector)
            .maybe_output(target.output)
            .build(),
    };

    // Load config, init logging and run
    run_with_config_path(args.config.as_deref(), &job)
}

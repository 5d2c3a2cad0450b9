use clap::{App, Arg, ArgMatches, SubCommand};
use env_logger::Env;
use flate2::Compression;
use log::{error, info};
use nbtfs::path::EntryKind;
use nbtfs::Document;
use rayon::prelude::*;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

fn load(args: &ArgMatches) -> Result<Document> {
    let file = args.value_of("file").ok_or("no file given")?;
    let doc = Document::load(file)?;
    info!("loaded {} (root name {:?})", file, doc.name());
    Ok(doc)
}

fn ls(args: &ArgMatches) -> Result<()> {
    let doc = load(args)?;
    let path = args.value_of("path").unwrap_or("/");

    for entry in doc.list_children(path)? {
        match entry.kind {
            EntryKind::Directory => println!("{}/", entry.name),
            EntryKind::File => println!("{}", entry.name),
        }
    }
    Ok(())
}

fn cat(args: &ArgMatches) -> Result<()> {
    let doc = load(args)?;
    let paths: Vec<&str> = args.values_of("path").map(Iterator::collect).unwrap_or_default();

    // Leaves are rendered in parallel against the one shared document, the
    // way a filesystem host would serve concurrent reads.
    let contents: Vec<_> = paths.par_iter().map(|path| doc.read_leaf(path)).collect();

    for (path, content) in paths.iter().zip(contents) {
        match content {
            Ok(text) => println!("{}", text),
            Err(e) => {
                error!("{}: {}", path, e);
                return Err(e.into());
            }
        }
    }

    info!("{} renderings cached", doc.cache().len());
    Ok(())
}

fn stat(args: &ArgMatches) -> Result<()> {
    let doc = load(args)?;
    let path = args.value_of("path").unwrap_or("/");

    match doc.attributes(path)? {
        EntryKind::Directory => println!("{}: directory", path),
        EntryKind::File => println!("{}: file, {} bytes", path, doc.read_leaf(path)?.len()),
    }
    Ok(())
}

fn tree(args: &ArgMatches) -> Result<()> {
    fn walk(doc: &Document, path: &str, indent: usize) -> nbtfs::error::Result<()> {
        for entry in doc.list_children(path)? {
            let child = format!("{}/{}", path.trim_end_matches('/'), entry.name);
            match entry.kind {
                EntryKind::Directory => {
                    println!("{:indent$}{}/", "", entry.name, indent = indent);
                    walk(doc, &child, indent + 4)?;
                }
                EntryKind::File => println!(
                    "{:indent$}{} = {}",
                    "",
                    entry.name,
                    doc.read_leaf(&child)?,
                    indent = indent
                ),
            }
        }
        Ok(())
    }

    let doc = load(args)?;
    walk(&doc, args.value_of("path").unwrap_or("/"), 0)?;
    Ok(())
}

fn json(args: &ArgMatches) -> Result<()> {
    let doc = load(args)?;
    let stdout = std::io::stdout();
    serde_json::to_writer_pretty(stdout.lock(), doc.root())?;
    println!();
    Ok(())
}

fn resave(args: &ArgMatches) -> Result<()> {
    let doc = load(args)?;
    let out = args.value_of("out").ok_or("no output given")?;
    let level: u32 = args.value_of("level").unwrap_or("1").parse()?;

    doc.save_with(out, Compression::new(level))?;
    info!("saved {} at level {}", out, level);
    Ok(())
}

fn mutate(op: &str, args: &ArgMatches) -> Result<()> {
    let doc = load(args)?;
    let path = args.value_of("path").ok_or("no path given")?;

    match op {
        "touch" => doc.create_file(path)?,
        "mkdir" => doc.create_dir(path)?,
        _ => doc.remove_file(path)?,
    }
    Ok(())
}

fn file_arg() -> Arg<'static, 'static> {
    Arg::with_name("file").takes_value(true).required(true)
}

fn path_arg(required: bool) -> Arg<'static, 'static> {
    Arg::with_name("path").takes_value(true).required(required)
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let matches = App::new("nbtfs")
        .about("browse NBT files as a tree of typed paths")
        .subcommand(
            SubCommand::with_name("ls")
                .about("list the children of a directory path")
                .arg(file_arg())
                .arg(path_arg(false)),
        )
        .subcommand(
            SubCommand::with_name("cat")
                .about("print the text of one or more leaf paths")
                .arg(file_arg())
                .arg(path_arg(true).multiple(true)),
        )
        .subcommand(
            SubCommand::with_name("stat")
                .about("show whether a path is a directory or a file")
                .arg(file_arg())
                .arg(path_arg(false)),
        )
        .subcommand(
            SubCommand::with_name("tree")
                .about("print every path below a directory")
                .arg(file_arg())
                .arg(path_arg(false)),
        )
        .subcommand(
            SubCommand::with_name("json")
                .about("dump the decoded tree as JSON")
                .arg(file_arg()),
        )
        .subcommand(
            SubCommand::with_name("resave")
                .about("re-encode the file, gzip compressed")
                .arg(file_arg())
                .arg(Arg::with_name("out").takes_value(true).required(true))
                .arg(
                    Arg::with_name("level")
                        .long("level")
                        .takes_value(true)
                        .required(false)
                        .default_value("1"),
                ),
        )
        .subcommand(SubCommand::with_name("touch").arg(file_arg()).arg(path_arg(true)))
        .subcommand(SubCommand::with_name("mkdir").arg(file_arg()).arg(path_arg(true)))
        .subcommand(SubCommand::with_name("rm").arg(file_arg()).arg(path_arg(true)))
        .get_matches();

    let result = match matches.subcommand() {
        ("ls", Some(args)) => ls(args),
        ("cat", Some(args)) => cat(args),
        ("stat", Some(args)) => stat(args),
        ("tree", Some(args)) => tree(args),
        ("json", Some(args)) => json(args),
        ("resave", Some(args)) => resave(args),
        (op @ ("touch" | "mkdir" | "rm"), Some(args)) => mutate(op, args),
        _ => {
            error!("{}", matches.usage());
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        error!("{}", e);
        let code = match e.downcast_ref::<nbtfs::error::Error>() {
            Some(e) => e.errno(),
            None => 1,
        };
        std::process::exit(code);
    }
}

use flate2::Compression;

use crate::error::{ErrorKind, Result, EIO, EISDIR, ENOENT, ENOTDIR, EPERM};
use crate::gzip;
use crate::path::EntryKind;
use crate::{Compound, Document, Tag, Value};

use super::builder::Builder;

fn steve() -> Vec<u8> {
    Builder::new()
        .start_compound("")
        .string("Name", "Steve")
        .short("Health", 20)
        .start_list("Inventory", Tag::Compound, 2)
        .start_anon_compound()
        .int("id", 1)
        .end_compound()
        .start_anon_compound()
        .int("id", 2)
        .end_compound()
        .end_compound()
        .build()
}

fn listed(doc: &Document, path: &str) -> Vec<String> {
    let mut names: Vec<_> = doc
        .list_children(path)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    names.sort();
    names
}

#[test]
fn steve_scenario() -> Result<()> {
    let doc = Document::from_bytes(&steve())?;

    assert_eq!(
        listed(&doc, "/"),
        vec!["Health.int16.txt", "Inventory.list_any", "Name.string.txt"]
    );
    assert_eq!(
        listed(&doc, "/Inventory.list_any"),
        vec!["0.compound", "1.compound"]
    );
    assert_eq!(
        listed(&doc, "/Inventory.list_any/1.compound"),
        vec!["id.int32.txt"]
    );

    assert_eq!(&*doc.read_leaf("/Health.int16.txt")?, "20");
    assert_eq!(&*doc.read_leaf("/Name.string.txt")?, "Steve");
    assert_eq!(
        &*doc.read_leaf("/Inventory.list_any/1.compound/id.int32.txt")?,
        "2"
    );
    Ok(())
}

#[test]
fn gzipped_input_loads_the_same() -> Result<()> {
    let gz = gzip::compress(&steve(), Compression::default())?;
    let raw = Document::from_bytes(&steve())?;
    let inflated = Document::from_bytes(&gzip::decompress(gz)?)?;
    assert_eq!(raw.root(), inflated.root());
    Ok(())
}

#[test]
fn attributes() -> Result<()> {
    let doc = Document::from_bytes(&steve())?;
    assert_eq!(doc.attributes("/")?, EntryKind::Directory);
    assert_eq!(doc.attributes("/Inventory.list_any")?, EntryKind::Directory);
    assert_eq!(doc.attributes("/Inventory.list_any/0.compound")?, EntryKind::Directory);
    assert_eq!(doc.attributes("/Name.string.txt")?, EntryKind::File);
    assert_eq!(doc.attributes("//Health.int16.txt/")?, EntryKind::File);

    let err = doc.attributes("/Name.int8.txt").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound);
    assert_eq!(err.errno(), ENOENT);
    Ok(())
}

#[test]
fn request_errors() -> Result<()> {
    let doc = Document::from_bytes(&steve())?;

    let err = doc.read_leaf("/Inventory.list_any").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotALeaf);
    assert_eq!(err.errno(), EISDIR);
    assert!(!err.is_fatal());

    let err = doc.read_leaf("/").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotALeaf);

    let err = doc.read_leaf("/Mana.int16.txt").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound);

    let err = doc.list_children("/Health.int16.txt").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotADirectory);
    assert_eq!(err.errno(), ENOTDIR);

    let err = doc.list_children("/Inventory.list_any/2.compound").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NotFound);

    // failures leave nothing behind in the cache.
    assert!(doc.cache().is_empty());
    Ok(())
}

#[test]
fn reads_are_cached_by_normalised_path() -> Result<()> {
    let doc = Document::from_bytes(&steve())?;
    let a = doc.read_leaf("/Health.int16.txt")?;
    let b = doc.read_leaf("//Health.int16.txt/")?;
    assert!(std::sync::Arc::ptr_eq(&a, &b));
    assert_eq!(doc.cache().len(), 1);
    assert_eq!(doc.cache().get("/Health.int16.txt").as_deref(), Some("20"));
    Ok(())
}

#[test]
fn concurrent_reads() -> Result<()> {
    let doc = Document::from_bytes(&steve())?;
    let paths = [
        "/Health.int16.txt",
        "/Name.string.txt",
        "/Inventory.list_any/0.compound/id.int32.txt",
        "/Inventory.list_any/1.compound/id.int32.txt",
    ];

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for path in paths {
                    doc.read_leaf(path).unwrap();
                    doc.list_children("/").unwrap();
                }
            });
        }
    });

    assert_eq!(doc.cache().len(), paths.len());
    Ok(())
}

#[test]
fn mutations_are_rejected() -> Result<()> {
    let doc = Document::from_bytes(&steve())?;
    doc.read_leaf("/Health.int16.txt")?;
    let before = doc.root().clone();

    let attempts = [
        doc.create_file("/New.int8.txt"),
        doc.create_dir("/New.compound"),
        doc.write("/Health.int16.txt", b"21"),
        doc.remove_file("/Name.string.txt"),
        doc.remove_dir("/Inventory.list_any"),
    ];

    for attempt in attempts {
        let err = attempt.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::PermissionDenied);
        assert_eq!(err.errno(), EPERM);
    }

    assert_eq!(doc.root(), &before);
    assert_eq!(doc.cache().len(), 1);
    assert_eq!(&*doc.read_leaf("/Health.int16.txt")?, "20");
    Ok(())
}

#[test]
fn root_must_be_compound() {
    let input = Builder::new().int("", 1).build();
    let err = Document::from_bytes(&input).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NoRootCompound);
    assert!(err.is_fatal());

    let err = Document::from_bytes(&[0]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::NoRootCompound);
}

#[test]
fn decode_errors_are_fatal() {
    let input = steve();
    let err = Document::from_bytes(&input[..input.len() - 1]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
    assert!(err.is_fatal());
    assert_eq!(err.errno(), EIO);
}

#[test]
fn save_then_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("player.dat");

    let doc = Document::from_bytes(&steve())?;
    doc.save(&path)?;

    let on_disk = std::fs::read(&path)?;
    assert!(gzip::is_gzip(&on_disk));

    let loaded = Document::load(&path)?;
    assert_eq!(loaded.name(), doc.name());
    assert_eq!(loaded.root(), doc.root());
    assert_eq!(&*loaded.read_leaf("/Health.int16.txt")?, "20");
    Ok(())
}

#[test]
fn load_raw_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("raw.nbt");
    std::fs::write(&path, steve())?;

    let doc = Document::load(&path)?;
    assert_eq!(&*doc.read_leaf("/Name.string.txt")?, "Steve");
    Ok(())
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Document::load(dir.path().join("nope.dat")).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Io);
}

#[test]
fn built_document_round_trips() -> Result<()> {
    let mut root = Compound::new();
    root.insert("Pos".to_owned(), Value::List(Tag::Double, vec![0.5f64.into(); 3]));
    root.insert("Seed".to_owned(), Value::Long(-42));
    let doc = Document::new("Data", root);

    let loaded = Document::from_bytes(&doc.to_bytes()?)?;
    assert_eq!(loaded.name(), "Data");
    assert_eq!(loaded.root(), doc.root());
    assert_eq!(&*loaded.read_leaf("/Pos.list_any/2.double.txt")?, "0.5");
    assert_eq!(&*loaded.read_leaf("/Seed.int64.txt")?, "-42");
    Ok(())
}

#[test]
fn keys_with_slash_are_hidden() -> Result<()> {
    let input = Builder::new()
        .start_compound("")
        .int("x/y", 1)
        .start_compound("dir/")
        .end_compound()
        .int("z", 2)
        .end_compound()
        .build();
    let doc = Document::from_bytes(&input)?;

    // still decoded and kept.
    assert_eq!(doc.root().as_compound().unwrap().len(), 3);

    assert_eq!(listed(&doc, "/"), vec!["z.int32.txt"]);
    for entry in doc.list_children("/")? {
        doc.attributes(&entry.name)?;
    }
    assert_eq!(
        doc.read_leaf("/x/y.int32.txt").unwrap_err().kind(),
        &ErrorKind::NotFound
    );
    Ok(())
}

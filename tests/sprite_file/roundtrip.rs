use sprset_rs::prelude::*;
use tempfile::tempdir;

use crate::{assert_matches_set, random_set, save_fresh};

#[test]
fn save_and_reopen_uncompressed() {
	let dir = tempdir().unwrap();
	let spr_path = dir.path().join("acsprset.spr");
	let set = random_set(1, 30);

	save_fresh(&spr_path, &set, &SaveOptions::new(false));

	let mut file = SprFile::open(&spr_path, dir.path().join("sprindex.dat")).unwrap();
	assert!(!file.is_compressed());
	assert_eq!(file.topmost_sprite(), set.topmost());
	assert_matches_set(&mut file, &set);
}

#[test]
fn save_and_reopen_compressed() {
	let dir = tempdir().unwrap();
	let spr_path = dir.path().join("acsprset.spr");
	let set = random_set(2, 50);

	save_fresh(&spr_path, &set, &SaveOptions::new(true));

	let mut file = SprFile::open(&spr_path, dir.path().join("sprindex.dat")).unwrap();
	assert!(file.is_compressed());
	assert_matches_set(&mut file, &set);
}

#[test]
fn resave_from_disk_flips_compression() {
	let dir = tempdir().unwrap();
	let packed_path = dir.path().join("packed.spr");
	let plain_path = dir.path().join("plain.spr");
	let set = random_set(3, 40);

	save_fresh(&packed_path, &set, &SaveOptions::new(true));
	let mut packed = SprFile::open(&packed_path, dir.path().join("missing.dat")).unwrap();

	let options = SaveOptions::new(false).with_file_id(packed.file_id());
	save_sprite_file(&plain_path, &SpriteSet::new(), Some(&mut packed), &options).unwrap();

	let mut plain = SprFile::open(&plain_path, dir.path().join("missing.dat")).unwrap();
	assert!(!plain.is_compressed());
	assert_eq!(plain.file_id(), packed.file_id());
	assert_matches_set(&mut plain, &set);
}

#[test]
fn resave_with_edits() {
	let dir = tempdir().unwrap();
	let source_path = dir.path().join("source.spr");
	let edited_path = dir.path().join("edited.spr");
	let mut set = random_set(4, 20);

	save_fresh(&source_path, &set, &SaveOptions::new(true));
	let mut source = SprFile::open(&source_path, dir.path().join("missing.dat")).unwrap();

	let mut edits = SpriteSet::new();
	let added = Bitmap::from_pixels(3, 1, BitDepth::Indexed8, vec![7, 7, 8]).unwrap();
	edits.insert(25, added.clone());
	set.insert(25, added);

	save_sprite_file(&edited_path, &edits, Some(&mut source), &SaveOptions::new(true)).unwrap();

	let mut edited = SprFile::open(&edited_path, dir.path().join("missing.dat")).unwrap();
	assert_eq!(edited.topmost_sprite(), Some(25));
	assert_matches_set(&mut edited, &set);
}

#[test]
fn open_rejects_non_sprite_files() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("bogus.spr");
	let mut data = 11u16.to_le_bytes().to_vec();
	data.extend_from_slice(b" Sprite Film ");
	data.extend_from_slice(&[0; 16]);
	std::fs::write(&path, data).unwrap();

	let err = SprFile::open(&path, dir.path().join("sprindex.dat")).unwrap_err();
	assert!(matches!(err, SpriteFileError::BadSignature(_)));
	assert_eq!(err.status_code(), -2);

	let mut data = 12u16.to_le_bytes().to_vec();
	data.extend_from_slice(b" Sprite File ");
	std::fs::write(&path, data).unwrap();
	let err = SprFile::open(&path, dir.path().join("sprindex.dat")).unwrap_err();
	assert!(matches!(
		err,
		SpriteFileError::UnsupportedVersion {
			version: 12,
			..
		}
	));
}

#[test]
fn missing_files_report_open_failed() {
	let dir = tempdir().unwrap();

	let err = SprFile::open(dir.path().join("nope.spr"), dir.path().join("nope.dat")).unwrap_err();
	assert!(matches!(err, SpriteFileError::OpenFailed { .. }));
	assert_eq!(err.status_code(), -1);

	let err = save_sprite_file(
		dir.path().join("no_such_dir").join("out.spr"),
		&SpriteSet::new(),
		None::<&mut SprFile<std::fs::File>>,
		&SaveOptions::default(),
	)
	.unwrap_err();
	assert!(matches!(err, SpriteFileError::OpenFailed { .. }));
}

#[test]
fn resave_in_place_keeps_source_readable() {
	let dir = tempdir().unwrap();
	let path = dir.path().join("acsprset.spr");
	let set = random_set(5, 12);

	save_fresh(&path, &set, &SaveOptions::new(true));
	let mut source = SprFile::open(&path, dir.path().join("missing.dat")).unwrap();

	let options = SaveOptions::new(false).with_file_id(source.file_id());
	save_sprite_file(&path, &SpriteSet::new(), Some(&mut source), &options).unwrap();
	drop(source);

	let mut resaved = SprFile::open(&path, dir.path().join("missing.dat")).unwrap();
	assert!(!resaved.is_compressed());
	assert_matches_set(&mut resaved, &set);
	assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn failed_save_leaves_destination_untouched() {
	let dir = tempdir().unwrap();
	let source_path = dir.path().join("broken.spr");
	let output_path = dir.path().join("out.spr");

	// one compressed slot whose packet overruns its row
	let mut writer = SprWriter::new(std::fs::File::create(&source_path).unwrap());
	writer.begin(true, Some(0)).unwrap();
	writer.write_sprite_data(&[0xFD, 1], 2, 2, 1).unwrap();
	writer.finalize().unwrap();
	drop(writer);

	std::fs::write(&output_path, b"keep me").unwrap();
	let mut source = SprFile::open(&source_path, dir.path().join("missing.dat")).unwrap();

	let err = save_sprite_file(
		&output_path,
		&SpriteSet::new(),
		Some(&mut source),
		&SaveOptions::new(false),
	)
	.unwrap_err();
	assert!(matches!(err, SpriteFileError::CorruptPayload { key: 0, .. }));
	assert_eq!(std::fs::read(&output_path).unwrap(), b"keep me");
	assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 2);
}

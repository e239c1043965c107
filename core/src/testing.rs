//! Fixture builders shared by the unit tests

use dicom::core::value::PrimitiveValue;
use dicom::core::{DataElement, VR};
use dicom::dictionary_std::tags;
use dicom::object::{DefaultDicomObject, FileDicomObject, FileMetaTableBuilder};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const MR_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.4";
pub const EXPLICIT_VR_LE: &str = "1.2.840.10008.1.2.1";
pub const SOP_INSTANCE_UID: &str = "1.2.826.0.1.3680043.2.1125.1.1";
pub const STUDY_INSTANCE_UID: &str = "1.2.826.0.1.3680043.2.1125.1.2";
pub const SERIES_INSTANCE_UID: &str = "1.2.826.0.1.3680043.2.1125.1.3";

/// Empty object with a file meta group for the given instance
pub fn empty_object(sop_instance_uid: &str) -> DefaultDicomObject {
    let meta = FileMetaTableBuilder::new()
        .media_storage_sop_class_uid(MR_IMAGE_STORAGE)
        .media_storage_sop_instance_uid(sop_instance_uid)
        .transfer_syntax(EXPLICIT_VR_LE)
        .implementation_class_uid("1.2.826.0.1.3680043.2.1125.99")
        .build()
        .expect("valid file meta table");
    FileDicomObject::new_empty_with_meta(meta)
}

/// MR object with a handful of identification and geometry attributes
pub fn sample_object() -> DefaultDicomObject {
    let mut object = empty_object(SOP_INSTANCE_UID);
    object.put(DataElement::new(
        tags::SOP_CLASS_UID,
        VR::UI,
        PrimitiveValue::from(MR_IMAGE_STORAGE),
    ));
    object.put(DataElement::new(
        tags::SOP_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(SOP_INSTANCE_UID),
    ));
    object.put(DataElement::new(
        tags::IMAGE_TYPE,
        VR::CS,
        PrimitiveValue::Strs(vec!["ORIGINAL".to_string(), "PRIMARY".to_string()].into()),
    ));
    object.put(DataElement::new(
        tags::MODALITY,
        VR::CS,
        PrimitiveValue::from("MR"),
    ));
    object.put(DataElement::new(
        tags::PATIENT_NAME,
        VR::PN,
        PrimitiveValue::from("Doe^Jane"),
    ));
    object.put(DataElement::new(
        tags::PATIENT_ID,
        VR::LO,
        PrimitiveValue::from("PID0001"),
    ));
    object.put(DataElement::new(
        tags::STUDY_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(STUDY_INSTANCE_UID),
    ));
    object.put(DataElement::new(
        tags::SERIES_INSTANCE_UID,
        VR::UI,
        PrimitiveValue::from(SERIES_INSTANCE_UID),
    ));
    object.put(DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(256_u16)));
    object.put(DataElement::new(
        tags::COLUMNS,
        VR::US,
        PrimitiveValue::from(256_u16),
    ));
    object
}

/// Sample object with its InstanceNumber set
pub fn numbered_object(instance_number: &str) -> DefaultDicomObject {
    let mut object = sample_object();
    object.put(DataElement::new(
        tags::INSTANCE_NUMBER,
        VR::IS,
        PrimitiveValue::from(instance_number),
    ));
    object
}

/// Writes an object as a DICOM file (preamble, magic, meta group, dataset)
pub fn write_object(dir: &Path, name: &str, object: &DefaultDicomObject) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create fixture directory");
    }
    object.write_to_file(&path).expect("write DICOM fixture");
    path
}

/// Writes the sample object to `dir/name`
pub fn write_sample(dir: &Path, name: &str) -> PathBuf {
    write_object(dir, name, &sample_object())
}

/// Writes a zip file holding the given entries
pub fn write_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = File::create(path).expect("create zip fixture");
    let mut writer = ZipWriter::new(file);
    for (name, data) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(name.trim_end_matches('/'), SimpleFileOptions::default())
                .expect("add zip directory");
        } else {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("start zip entry");
            writer.write_all(data).expect("write zip entry");
        }
    }
    writer.finish().expect("finish zip fixture");
}

/// Writes a zip whose entries are stored uncompressed, so their bytes can be patched in place
pub fn write_stored_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
    let file = File::create(path).expect("create zip fixture");
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, data) in entries {
        writer.start_file(*name, options).expect("start zip entry");
        writer.write_all(data).expect("write zip entry");
    }
    writer.finish().expect("finish zip fixture");
}

/// Overwrites bytes at `offset` past the first occurrence of `needle` in a file
pub fn patch_file(path: &Path, needle: &[u8], offset: usize, replacement: &[u8]) {
    let mut data = std::fs::read(path).expect("read fixture");
    let start = data
        .windows(needle.len())
        .position(|window| window == needle)
        .expect("needle present in fixture")
        + offset;
    data[start..start + replacement.len()].copy_from_slice(replacement);
    std::fs::write(path, data).expect("rewrite fixture");
}

/// Marks every entry of a single-entry zip with an unknown compression method
pub fn break_compression_method(path: &Path) {
    const UNKNOWN_METHOD: [u8; 2] = [97, 0];
    patch_file(path, b"PK\x03\x04", 8, &UNKNOWN_METHOD);
    patch_file(path, b"PK\x01\x02", 10, &UNKNOWN_METHOD);
}

use dicom_core::Tag;

// Image Identification Tags
pub const SPECIFIC_CHARACTER_SET: Tag = Tag(0x0008, 0x0005);
pub const IMAGE_TYPE: Tag = Tag(0x0008, 0x0008);

// Geometry Tags
pub const PATIENT_ORIENTATION: Tag = Tag(0x0020, 0x0020);
pub const IMAGE_POSITION_PATIENT: Tag = Tag(0x0020, 0x0032);
pub const IMAGE_ORIENTATION_PATIENT: Tag = Tag(0x0020, 0x0037);
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);

// Presentation Tags
pub const WINDOW_CENTER: Tag = Tag(0x0028, 0x1050);
pub const WINDOW_WIDTH: Tag = Tag(0x0028, 0x1051);

/// Attributes whose value multiplicity is not 1, sorted by tag
///
/// The standard dictionary only records keyword and VR, so multiplicity
/// is classified here. Anything not listed is treated as single-valued.
pub const MULTI_VALUED: &[Tag] = &[
    SPECIFIC_CHARACTER_SET,
    IMAGE_TYPE,
    Tag(0x0008, 0x0054), // RetrieveAETitle
    Tag(0x0008, 0x0058), // FailedSOPInstanceUIDList
    Tag(0x0008, 0x0061), // ModalitiesInStudy
    Tag(0x0008, 0x0094), // ReferringPhysicianTelephoneNumbers
    Tag(0x0008, 0x009C), // ConsultingPhysicianName
    Tag(0x0008, 0x1048), // PhysiciansOfRecord
    Tag(0x0008, 0x1050), // PerformingPhysicianName
    Tag(0x0008, 0x1060), // NameOfPhysiciansReadingStudy
    Tag(0x0008, 0x1070), // OperatorsName
    Tag(0x0008, 0x1080), // AdmittingDiagnosesDescription
    Tag(0x0008, 0x1160), // ReferencedFrameNumber
    Tag(0x0008, 0x9007), // FrameType
    Tag(0x0010, 0x1000), // OtherPatientIDs
    Tag(0x0010, 0x1001), // OtherPatientNames
    Tag(0x0010, 0x2000), // MedicalAlerts
    Tag(0x0010, 0x2110), // Allergies
    Tag(0x0010, 0x2154), // PatientTelephoneNumbers
    Tag(0x0018, 0x0020), // ScanningSequence
    Tag(0x0018, 0x0021), // SequenceVariant
    Tag(0x0018, 0x0022), // ScanOptions
    Tag(0x0018, 0x0086), // EchoNumbers
    Tag(0x0018, 0x1019), // SecondaryCaptureDeviceSoftwareVersions
    Tag(0x0018, 0x101A), // HardcopyDeviceSoftwareVersion
    Tag(0x0018, 0x1020), // SoftwareVersions
    Tag(0x0018, 0x1046), // ContrastFlowRate
    Tag(0x0018, 0x1047), // ContrastFlowDuration
    Tag(0x0018, 0x1065), // FrameTimeVector
    Tag(0x0018, 0x106C), // SynchronizationChannel
    Tag(0x0018, 0x1149), // FieldOfViewDimensions
    Tag(0x0018, 0x1161), // TypeOfFilters
    Tag(0x0018, 0x1164), // ImagerPixelSpacing
    Tag(0x0018, 0x1166), // Grid
    Tag(0x0018, 0x1190), // FocalSpots
    Tag(0x0018, 0x1200), // DateOfLastCalibration
    Tag(0x0018, 0x1201), // TimeOfLastCalibration
    Tag(0x0018, 0x1210), // ConvolutionKernel
    Tag(0x0018, 0x1310), // AcquisitionMatrix
    Tag(0x0018, 0x1600), // ShutterShape
    Tag(0x0018, 0x1610), // CenterOfCircularShutter
    Tag(0x0018, 0x1620), // VerticesOfThePolygonalShutter
    Tag(0x0018, 0x1700), // CollimatorShape
    Tag(0x0018, 0x2010), // NominalScannedPixelSpacing
    Tag(0x0018, 0x5010), // TransducerData
    Tag(0x0018, 0x701A), // DetectorBinning
    Tag(0x0018, 0x7020), // DetectorElementPhysicalSize
    Tag(0x0018, 0x7022), // DetectorElementSpacing
    Tag(0x0018, 0x7026), // DetectorActiveDimensions
    Tag(0x0018, 0x7028), // DetectorActiveOrigin
    Tag(0x0018, 0x7030), // FieldOfViewOrigin
    Tag(0x0018, 0x7050), // FilterMaterial
    Tag(0x0018, 0x7052), // FilterThicknessMinimum
    Tag(0x0018, 0x7054), // FilterThicknessMaximum
    Tag(0x0018, 0x9079), // InversionTimes
    Tag(0x0018, 0x9089), // DiffusionGradientOrientation
    Tag(0x0018, 0x9313), // DataCollectionCenterPatient
    Tag(0x0018, 0x9317), // ReconstructionFieldOfView
    Tag(0x0018, 0x9318), // ReconstructionTargetCenterPatient
    Tag(0x0018, 0x9322), // ReconstructionPixelSpacing
    PATIENT_ORIENTATION,
    IMAGE_POSITION_PATIENT,
    IMAGE_ORIENTATION_PATIENT,
    Tag(0x0020, 0x9157), // DimensionIndexValues
    Tag(0x0028, 0x0009), // FrameIncrementPointer
    PIXEL_SPACING,
    Tag(0x0028, 0x0034), // PixelAspectRatio
    Tag(0x0028, 0x0051), // CorrectedImage
    WINDOW_CENTER,
    WINDOW_WIDTH,
    Tag(0x0028, 0x1055), // WindowCenterWidthExplanation
    Tag(0x0028, 0x1101), // RedPaletteColorLookupTableDescriptor
    Tag(0x0028, 0x1102), // GreenPaletteColorLookupTableDescriptor
    Tag(0x0028, 0x1103), // BluePaletteColorLookupTableDescriptor
    Tag(0x0028, 0x2112), // LossyImageCompressionRatio
    Tag(0x0028, 0x2114), // LossyImageCompressionMethod
    Tag(0x0028, 0x3002), // LUTDescriptor
    Tag(0x0040, 0x0001), // ScheduledStationAETitle
    Tag(0x0040, 0xA0B0), // ReferencedWaveformChannels
    Tag(0x0054, 0x1000), // SeriesType
    Tag(0x0070, 0x0052), // DisplayedAreaTopLeftHandCorner
    Tag(0x0070, 0x0053), // DisplayedAreaBottomRightHandCorner
];

/// Checks whether a tag is listed as multi-valued
pub fn is_multi_valued(tag: Tag) -> bool {
    MULTI_VALUED.binary_search(&tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_values() {
        // Just ensure tags are correctly defined
        assert_eq!(IMAGE_TYPE, Tag(0x0008, 0x0008));
        assert_eq!(PIXEL_SPACING, Tag(0x0028, 0x0030));
        assert_eq!(WINDOW_CENTER, Tag(0x0028, 0x1050));
        assert_eq!(PATIENT_ORIENTATION, Tag(0x0020, 0x0020));
    }

    #[test]
    fn test_table_is_sorted() {
        assert!(MULTI_VALUED.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_is_multi_valued() {
        assert!(is_multi_valued(IMAGE_TYPE));
        assert!(is_multi_valued(Tag(0x0028, 0x0030)));
        assert!(is_multi_valued(Tag(0x0070, 0x0053)));
        // PatientName
        assert!(!is_multi_valued(Tag(0x0010, 0x0010)));
    }
}

//! NTSC color palette.
//!
//! The TIA color registers hold a 7-bit value: hue in bits 4-7,
//! luminance in bits 1-3 (bit 0 is unused). The table below maps all
//! 128 combinations to 0RGB, sixteen hue rows of eight luminances.

/// NTSC palette indexed by `color >> 1`.
const NTSC: [u32; 128] = [
    0x0000_0000, 0x004A_4A4A, 0x006F_6F6F, 0x008E_8E8E, 0x00AA_AAAA, 0x00C0_C0C0, 0x00D6_D6D6, 0x00EC_ECEC,
    0x0048_4800, 0x0069_690F, 0x0086_861D, 0x00A2_A22A, 0x00BB_BB35, 0x00D2_D240, 0x00E8_E84A, 0x00FC_FC54,
    0x007C_2C00, 0x0090_4811, 0x00A2_6221, 0x00B4_7A30, 0x00C3_903D, 0x00D2_A44A, 0x00DF_B755, 0x00EC_C860,
    0x0090_1C00, 0x00A3_3915, 0x00B5_5328, 0x00C6_6C3A, 0x00D5_824A, 0x00E3_9759, 0x00F0_AA67, 0x00FC_BC74,
    0x0094_0000, 0x00A7_1A1A, 0x00B8_3232, 0x00C8_4848, 0x00D6_5C5C, 0x00E4_6F6F, 0x00F0_8080, 0x00FC_9090,
    0x0084_0064, 0x0097_197A, 0x00A8_308F, 0x00B8_46A2, 0x00C6_59B3, 0x00D4_6CC3, 0x00E0_7CD2, 0x00EC_8CE0,
    0x0050_0084, 0x0068_199A, 0x007D_30AD, 0x0092_46C0, 0x00A4_59D0, 0x00B5_6CE0, 0x00C5_7CEE, 0x00D4_8CFC,
    0x0014_0090, 0x0033_1AA3, 0x004E_32B5, 0x0068_48C6, 0x007F_5CD5, 0x0095_6FE3, 0x00A9_80F0, 0x00BC_90FC,
    0x0000_0094, 0x0018_1AA7, 0x002D_32B8, 0x0042_48C8, 0x0054_5CD6, 0x0065_6FE4, 0x0075_80F0, 0x0084_90FC,
    0x0000_1C88, 0x0018_3B9D, 0x002D_57B0, 0x0042_72C2, 0x0054_8AD2, 0x0065_A0E1, 0x0075_B5EF, 0x0084_C8FC,
    0x0000_3064, 0x0018_5080, 0x002D_6D98, 0x0042_88B0, 0x0054_A0C5, 0x0065_B7D9, 0x0075_CCEB, 0x0084_E0FC,
    0x0000_4030, 0x0018_624E, 0x002D_8169, 0x0042_9E82, 0x0054_B899, 0x0065_D1AE, 0x0075_E7C2, 0x0084_FCD4,
    0x0000_4400, 0x001A_661A, 0x0032_8432, 0x0048_A048, 0x005C_BA5C, 0x006F_D26F, 0x0080_E880, 0x0090_FC90,
    0x0014_3C00, 0x0035_5F18, 0x0052_7E2D, 0x006E_9C42, 0x0087_B754, 0x009E_D065, 0x00B4_E775, 0x00C8_FC84,
    0x0030_3800, 0x0050_5916, 0x006D_762B, 0x0088_923E, 0x00A0_AB4F, 0x00B7_C25F, 0x00CC_D86E, 0x00E0_EC7C,
    0x0048_2C00, 0x0069_4D14, 0x0086_6A26, 0x00A2_8638, 0x00BB_9F47, 0x00D2_B656, 0x00E8_CC63, 0x00FC_E070,
];

/// Convert a TIA color register value to 0RGB.
#[must_use]
pub const fn rgb(color: u8) -> u32 {
    NTSC[(color >> 1) as usize]
}

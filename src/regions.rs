/// An entry in the static region catalog.
pub struct RegionInfo {
    pub code: &'static str,
    pub name: &'static str,
}

/// Region bound at startup unless overridden on the command line.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Commercial AWS regions selectable from the region picker. Compiled in,
/// never fetched.
pub static AWS_REGIONS: &[RegionInfo] = &[
    RegionInfo { code: "us-east-1", name: "US East (N. Virginia)" },
    RegionInfo { code: "us-east-2", name: "US East (Ohio)" },
    RegionInfo { code: "us-west-1", name: "US West (N. California)" },
    RegionInfo { code: "us-west-2", name: "US West (Oregon)" },
    RegionInfo { code: "af-south-1", name: "Africa (Cape Town)" },
    RegionInfo { code: "ap-east-1", name: "Asia Pacific (Hong Kong)" },
    RegionInfo { code: "ap-south-1", name: "Asia Pacific (Mumbai)" },
    RegionInfo { code: "ap-northeast-1", name: "Asia Pacific (Tokyo)" },
    RegionInfo { code: "ap-northeast-2", name: "Asia Pacific (Seoul)" },
    RegionInfo { code: "ap-northeast-3", name: "Asia Pacific (Osaka)" },
    RegionInfo { code: "ap-southeast-1", name: "Asia Pacific (Singapore)" },
    RegionInfo { code: "ap-southeast-2", name: "Asia Pacific (Sydney)" },
    RegionInfo { code: "ca-central-1", name: "Canada (Central)" },
    RegionInfo { code: "eu-central-1", name: "Europe (Frankfurt)" },
    RegionInfo { code: "eu-west-1", name: "Europe (Ireland)" },
    RegionInfo { code: "eu-west-2", name: "Europe (London)" },
    RegionInfo { code: "eu-west-3", name: "Europe (Paris)" },
    RegionInfo { code: "eu-north-1", name: "Europe (Stockholm)" },
    RegionInfo { code: "eu-south-1", name: "Europe (Milan)" },
    RegionInfo { code: "me-south-1", name: "Middle East (Bahrain)" },
    RegionInfo { code: "sa-east-1", name: "South America (São Paulo)" },
];

/// Position of a region code in the catalog, if it is a known code.
pub fn region_index(code: &str) -> Option<usize> {
    AWS_REGIONS.iter().position(|r| r.code == code)
}

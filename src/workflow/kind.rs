use crate::error::{CodecError, TemplateError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Master macro to define every experiment kind, its document name, and the
/// template field that carries its parameters.
macro_rules! define_experiment_kinds {
    ( $( ($variant:ident, $name:literal, $field:literal) ),* $(,)? ) => {
        /// A fault-injection experiment that can appear as a workflow leaf.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum ExperimentKind {
            $( $variant, )*
        }

        impl ExperimentKind {
            /// Every known kind, in declaration order.
            pub const ALL: &'static [ExperimentKind] = &[ $( ExperimentKind::$variant, )* ];

            /// The name used for `templateType` and schedule `type`, e.g. `PodChaos`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( ExperimentKind::$variant => $name, )*
                }
            }

            /// The template key holding this kind's parameters, e.g. `podChaos`.
            pub fn field_name(self) -> &'static str {
                match self {
                    $( ExperimentKind::$variant => $field, )*
                }
            }

            pub fn from_field_name(field: &str) -> Option<ExperimentKind> {
                match field {
                    $( $field => Some(ExperimentKind::$variant), )*
                    _ => None,
                }
            }

            pub fn from_name(name: &str) -> Option<ExperimentKind> {
                match name {
                    $( $name => Some(ExperimentKind::$variant), )*
                    _ => None,
                }
            }
        }
    };
}

define_experiment_kinds! {
    (AwsChaos, "AWSChaos", "awsChaos"),
    (AzureChaos, "AzureChaos", "azureChaos"),
    (BlockChaos, "BlockChaos", "blockChaos"),
    (DnsChaos, "DNSChaos", "dnsChaos"),
    (GcpChaos, "GCPChaos", "gcpChaos"),
    (HttpChaos, "HTTPChaos", "httpChaos"),
    (IoChaos, "IOChaos", "ioChaos"),
    (JvmChaos, "JVMChaos", "jvmChaos"),
    (KernelChaos, "KernelChaos", "kernelChaos"),
    (NetworkChaos, "NetworkChaos", "networkChaos"),
    (PodChaos, "PodChaos", "podChaos"),
    (StressChaos, "StressChaos", "stressChaos"),
    (TimeChaos, "TimeChaos", "timeChaos"),
    (PhysicalMachineChaos, "PhysicalMachineChaos", "physicalmachineChaos"),
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `templateType` of a workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateType {
    Serial,
    Parallel,
    Suspend,
    Schedule,
    Chaos(ExperimentKind),
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Serial => "Serial",
            TemplateType::Parallel => "Parallel",
            TemplateType::Suspend => "Suspend",
            TemplateType::Schedule => "Schedule",
            TemplateType::Chaos(kind) => kind.as_str(),
        }
    }

    /// `Serial` and `Parallel` own children; everything else is a leaf.
    pub fn is_group(&self) -> bool {
        matches!(self, TemplateType::Serial | TemplateType::Parallel)
    }

    pub fn experiment_kind(&self) -> Option<ExperimentKind> {
        match self {
            TemplateType::Chaos(kind) => Some(*kind),
            _ => None,
        }
    }

    /// The template key holding this type's parameters. Control types have none.
    pub fn field_name(&self) -> Option<&'static str> {
        self.experiment_kind().map(ExperimentKind::field_name)
    }
}

/// Like [`TemplateType::field_name`], but treats a missing mapping as an error.
pub fn template_type_to_field_name(template_type: &TemplateType) -> Result<&'static str, CodecError> {
    template_type
        .field_name()
        .ok_or_else(|| CodecError::UnmappedKind {
            template_type: template_type.as_str().to_string(),
        })
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateType {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Serial" => Ok(TemplateType::Serial),
            "Parallel" => Ok(TemplateType::Parallel),
            "Suspend" => Ok(TemplateType::Suspend),
            "Schedule" => Ok(TemplateType::Schedule),
            other => ExperimentKind::from_name(other)
                .map(TemplateType::Chaos)
                .ok_or_else(|| TemplateError::UnknownTemplateType(other.to_string())),
        }
    }
}

impl Serialize for TemplateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TemplateType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

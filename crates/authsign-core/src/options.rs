//! Option records for each signtool operation
//!
//! Every field is optional: `None`/`false` means the flag is not emitted.
//! No cross-field validation happens here; conflicting options are passed
//! through and left for signtool to reject.

use serde::{Deserialize, Serialize};

use crate::flags::{FlagSpec, FlagTable};
use crate::operation::Operation;

/// Value of the `/dg` option.
///
/// A boolean (either value) asks signtool to generate the digest into the
/// current directory; a string names the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DigestSource {
    /// Emits the placeholder directory whatever the value
    Enabled(bool),
    /// Output directory for the digest and PKCS#7 files
    Directory(String),
}

impl DigestSource {
    /// Directory token used when the digest is simply enabled
    pub const PLACEHOLDER: &'static str = ".";

    fn token(&self) -> String {
        match self {
            Self::Enabled(_) => Self::PLACEHOLDER.to_string(),
            Self::Directory(dir) => dir.clone(),
        }
    }
}

impl From<bool> for DigestSource {
    fn from(enabled: bool) -> Self {
        Self::Enabled(enabled)
    }
}

impl From<&str> for DigestSource {
    fn from(dir: &str) -> Self {
        Self::Directory(dir.to_string())
    }
}

/// Options for `signtool sign`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignOptions {
    /// Select the best signing certificate automatically (`/a`)
    pub auto: bool,
    /// Append this signature instead of replacing existing ones (`/as`)
    pub append: bool,
    /// Use the Windows System Component Verification EKU (`/uw`)
    pub verify: bool,
    /// Signing certificate file (`/f`)
    pub certificate: Option<String>,
    /// Password for the certificate file (`/p`)
    pub password: Option<String>,
    /// Issuer name of the certificate (`/i`)
    pub issuer: Option<String>,
    /// Subject name of the certificate (`/n`)
    pub subject: Option<String>,
    /// Subject name of the root certificate (`/r`)
    pub root_subject: Option<String>,
    /// Description of the signed content (`/d`)
    pub description: Option<String>,
    /// URL for an expanded description (`/du`)
    pub url: Option<String>,
    /// Certificate store to open (`/s`)
    pub store: Option<String>,
    /// Use a machine store instead of the user store (`/sm`)
    pub computer_store: bool,
    /// SHA1 thumbprint of the certificate (`/sha1`)
    pub sha1: Option<String>,
    /// Cryptographic service provider (`/csp`)
    pub csp: Option<String>,
    /// Private key container name (`/kc`)
    pub key: Option<String>,
    /// Certificate template name (`/c`)
    pub template: Option<String>,
    /// Additional certificate file (`/ac`)
    pub additional: Option<String>,
    /// File digest algorithm (`/fd`)
    pub algorithm: Option<String>,
    /// Enhanced key usage OID (`/u`)
    pub eku: Option<String>,
    /// Authenticode timestamp server URL (`/t`)
    pub timestamp: Option<String>,
    /// RFC 3161 timestamp server URL (`/tr`)
    pub rfc_timestamp: Option<String>,
    /// RFC 3161 timestamp digest algorithm (`/td`)
    pub timestamp_algo: Option<String>,
    /// Generate the digest to be signed (`/dg`)
    pub digest: Option<DigestSource>,
    /// Produce an XML digest file, requires `digest` (`/dxml`)
    pub digest_xml: bool,
    /// Metadata passed to the digest function, requires `digest` (`/dmdf`)
    pub digest_function: Option<String>,
    /// DLL implementing the digest signing function (`/dlib`)
    pub digest_lib: Option<String>,
    /// Sign the digest only (`/ds`)
    pub digest_only: bool,
    /// Generate a PKCS#7 file into this directory (`/p7`)
    pub pkcs: Option<String>,
    /// PKCS#7 content embedding, requires `pkcs` (`/p7ce`)
    pub pkcs_ce: Option<String>,
    /// PKCS#7 content OID, requires `pkcs` (`/p7co`)
    pub pkcs_oid: Option<String>,
    /// Generate page hashes (`/ph`)
    pub page_hashes: bool,
    /// Suppress page hashes (`/nph`)
    pub suppress_page_hashes: bool,
    /// Relaxed marker check for signing (`/rmc`)
    pub relaxed_marker_check: bool,
    /// Add a sealing signature (`/seal`)
    pub seal: bool,
    /// Set the intent-to-seal attribute (`/itos`)
    pub intent_to_seal: bool,
    /// Continue sealing or signing when the file is already sealed (`/force`)
    pub force: bool,
    /// Suppress sealing-related warnings (`/nosealwarn`)
    pub no_seal_warning: bool,
    /// RFC 3161 sealing timestamp server URL (`/tseal`)
    pub seal_timestamp: Option<String>,
    /// Request the CHW file digest algorithm (`/fdchw`)
    pub file_digest_chw: bool,
    /// Request the CHW timestamp digest algorithm (`/tdchw`)
    pub timestamp_digest_chw: bool,
}

impl SignOptions {
    /// Options that let signtool pick the best certificate
    pub fn automatic() -> Self {
        Self {
            auto: true,
            ..Default::default()
        }
    }
}

static SIGN_FLAGS: &[FlagSpec<SignOptions>] = &[
    FlagSpec::switch("auto", "/a", |o: &SignOptions| o.auto),
    FlagSpec::switch("append", "/as", |o: &SignOptions| o.append),
    FlagSpec::switch("verify", "/uw", |o: &SignOptions| o.verify),
    FlagSpec::value("certificate", "/f", |o: &SignOptions| o.certificate.clone()),
    FlagSpec::value("password", "/p", |o: &SignOptions| o.password.clone()),
    FlagSpec::value("issuer", "/i", |o: &SignOptions| o.issuer.clone()),
    FlagSpec::value("subject", "/n", |o: &SignOptions| o.subject.clone()),
    FlagSpec::value("root_subject", "/r", |o: &SignOptions| o.root_subject.clone()),
    FlagSpec::value("description", "/d", |o: &SignOptions| o.description.clone()),
    FlagSpec::value("url", "/du", |o: &SignOptions| o.url.clone()),
    FlagSpec::value("store", "/s", |o: &SignOptions| o.store.clone()),
    FlagSpec::switch("computer_store", "/sm", |o: &SignOptions| o.computer_store),
    FlagSpec::value("sha1", "/sha1", |o: &SignOptions| o.sha1.clone()),
    FlagSpec::value("csp", "/csp", |o: &SignOptions| o.csp.clone()),
    FlagSpec::value("key", "/kc", |o: &SignOptions| o.key.clone()),
    FlagSpec::value("template", "/c", |o: &SignOptions| o.template.clone()),
    FlagSpec::value("additional", "/ac", |o: &SignOptions| o.additional.clone()),
    FlagSpec::value("algorithm", "/fd", |o: &SignOptions| o.algorithm.clone()),
    FlagSpec::value("eku", "/u", |o: &SignOptions| o.eku.clone()),
    FlagSpec::value("timestamp", "/t", |o: &SignOptions| o.timestamp.clone()),
    FlagSpec::value("rfc_timestamp", "/tr", |o: &SignOptions| o.rfc_timestamp.clone()),
    FlagSpec::value("timestamp_algo", "/td", |o: &SignOptions| o.timestamp_algo.clone()),
    FlagSpec::parent(
        "digest",
        "/dg",
        |o: &SignOptions| o.digest.as_ref().map(DigestSource::token),
        SIGN_DIGEST_FLAGS,
    ),
    FlagSpec::value("digest_lib", "/dlib", |o: &SignOptions| o.digest_lib.clone()),
    FlagSpec::switch("digest_only", "/ds", |o: &SignOptions| o.digest_only),
    FlagSpec::parent("pkcs", "/p7", |o: &SignOptions| o.pkcs.clone(), SIGN_PKCS_FLAGS),
    FlagSpec::switch("page_hashes", "/ph", |o: &SignOptions| o.page_hashes),
    FlagSpec::switch("suppress_page_hashes", "/nph", |o: &SignOptions| {
        o.suppress_page_hashes
    }),
    FlagSpec::switch("relaxed_marker_check", "/rmc", |o: &SignOptions| {
        o.relaxed_marker_check
    }),
    FlagSpec::switch("seal", "/seal", |o: &SignOptions| o.seal),
    FlagSpec::switch("intent_to_seal", "/itos", |o: &SignOptions| o.intent_to_seal),
    FlagSpec::switch("force", "/force", |o: &SignOptions| o.force),
    FlagSpec::switch("no_seal_warning", "/nosealwarn", |o: &SignOptions| {
        o.no_seal_warning
    }),
    FlagSpec::value("seal_timestamp", "/tseal", |o: &SignOptions| {
        o.seal_timestamp.clone()
    }),
    FlagSpec::switch("file_digest_chw", "/fdchw", |o: &SignOptions| o.file_digest_chw),
    FlagSpec::switch("timestamp_digest_chw", "/tdchw", |o: &SignOptions| {
        o.timestamp_digest_chw
    }),
];

const SIGN_DIGEST_FLAGS: &[FlagSpec<SignOptions>] = &[
    FlagSpec::switch("digest_xml", "/dxml", |o: &SignOptions| o.digest_xml),
    FlagSpec::value("digest_function", "/dmdf", |o: &SignOptions| {
        o.digest_function.clone()
    }),
];

const SIGN_PKCS_FLAGS: &[FlagSpec<SignOptions>] = &[
    FlagSpec::value("pkcs_ce", "/p7ce", |o: &SignOptions| o.pkcs_ce.clone()),
    FlagSpec::value("pkcs_oid", "/p7co", |o: &SignOptions| o.pkcs_oid.clone()),
];

impl FlagTable for SignOptions {
    const OPERATION: Operation = Operation::Sign;

    fn table() -> &'static [FlagSpec<Self>] {
        SIGN_FLAGS
    }
}

/// Options for `signtool verify`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyOptions {
    /// Try every verification policy (`/a`)
    pub use_all_methods: bool,
    /// Verify by operating system version, `PlatformID:VerMajor.VerMinor.BuildNumber` (`/o`)
    pub os: Option<String>,
    /// Verify the signature at this position (`/ds`)
    pub index: Option<u32>,
    /// Optional hash algorithm for catalog lookup (`/hash`)
    pub hash: Option<String>,
    /// Root certificate subject must contain this string (`/r`)
    pub root_subject: Option<String>,
    /// Catalog database GUID (`/ag`)
    pub catalog_database: Option<String>,
    /// Catalog file (`/c`)
    pub catalog_file: Option<String>,
    /// Use the default catalog database (`/ad`)
    pub use_default_catalog: bool,
    /// Use the system component (driver) catalog database (`/as`)
    pub use_driver_catalog: bool,
    /// Verify all signatures in a file with multiple signatures (`/all`)
    pub verify_all_signatures: bool,
    /// Use the x64 kernel-mode driver signing policy (`/kp`)
    pub use_x64_kernel: bool,
    /// Use multiple verification semantics (`/ms`)
    pub use_multi_semantics: bool,
    /// Verify PKCS#7 files (`/p7`)
    pub verify_pkcs: bool,
    /// Print and verify page hash values (`/ph`)
    pub verify_page_hash: bool,
    /// Warn when the signature is not timestamped (`/tw`)
    pub verify_timestamp: bool,
    /// Use the default Authenticode verification policy (`/pa`)
    pub default_auth_policy: bool,
    /// Verification policy GUID (`/pg`)
    pub use_auth_policy: Option<String>,
    /// Print the description and description URL (`/d`)
    pub show_description: bool,
    /// Use the BIOS signing policy (`/bp`)
    pub bios_policy: bool,
    /// Use the enclave signing policy (`/enclave`)
    pub enclave: bool,
    /// Verify sealing signatures (`/sl`)
    pub verify_seal: bool,
}

impl VerifyOptions {
    /// Options that try every verification method
    pub fn all_methods() -> Self {
        Self {
            use_all_methods: true,
            ..Default::default()
        }
    }
}

static VERIFY_FLAGS: &[FlagSpec<VerifyOptions>] = &[
    FlagSpec::switch("use_all_methods", "/a", |o: &VerifyOptions| o.use_all_methods),
    FlagSpec::value("os", "/o", |o: &VerifyOptions| o.os.clone()),
    FlagSpec::value("index", "/ds", |o: &VerifyOptions| o.index.map(|i| i.to_string())),
    FlagSpec::value("hash", "/hash", |o: &VerifyOptions| o.hash.clone()),
    FlagSpec::value("root_subject", "/r", |o: &VerifyOptions| o.root_subject.clone()),
    FlagSpec::value("catalog_database", "/ag", |o: &VerifyOptions| {
        o.catalog_database.clone()
    }),
    FlagSpec::value("catalog_file", "/c", |o: &VerifyOptions| o.catalog_file.clone()),
    FlagSpec::switch("use_default_catalog", "/ad", |o: &VerifyOptions| {
        o.use_default_catalog
    }),
    FlagSpec::switch("use_driver_catalog", "/as", |o: &VerifyOptions| {
        o.use_driver_catalog
    }),
    FlagSpec::switch("verify_all_signatures", "/all", |o: &VerifyOptions| {
        o.verify_all_signatures
    }),
    FlagSpec::switch("use_x64_kernel", "/kp", |o: &VerifyOptions| o.use_x64_kernel),
    FlagSpec::switch("use_multi_semantics", "/ms", |o: &VerifyOptions| {
        o.use_multi_semantics
    }),
    FlagSpec::switch("verify_pkcs", "/p7", |o: &VerifyOptions| o.verify_pkcs),
    FlagSpec::switch("verify_page_hash", "/ph", |o: &VerifyOptions| o.verify_page_hash),
    FlagSpec::switch("verify_timestamp", "/tw", |o: &VerifyOptions| o.verify_timestamp),
    FlagSpec::switch("default_auth_policy", "/pa", |o: &VerifyOptions| {
        o.default_auth_policy
    }),
    FlagSpec::value("use_auth_policy", "/pg", |o: &VerifyOptions| {
        o.use_auth_policy.clone()
    }),
    FlagSpec::switch("show_description", "/d", |o: &VerifyOptions| o.show_description),
    FlagSpec::switch("bios_policy", "/bp", |o: &VerifyOptions| o.bios_policy),
    FlagSpec::switch("enclave", "/enclave", |o: &VerifyOptions| o.enclave),
    FlagSpec::switch("verify_seal", "/sl", |o: &VerifyOptions| o.verify_seal),
];

impl FlagTable for VerifyOptions {
    const OPERATION: Operation = Operation::Verify;

    fn table() -> &'static [FlagSpec<Self>] {
        VERIFY_FLAGS
    }
}

/// Options for `signtool timestamp`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimestampOptions {
    /// Authenticode timestamp server URL (`/t`)
    pub url: Option<String>,
    /// RFC 3161 timestamp server URL (`/tr`)
    pub rfc_url: Option<String>,
    /// RFC 3161 sealing timestamp server URL (`/tseal`)
    pub seal_url: Option<String>,
    /// Digest algorithm requested from the RFC 3161 server (`/td`)
    pub algorithm: Option<String>,
    /// Add the timestamp to the signature at this index (`/tp`)
    pub index: Option<u32>,
    /// Timestamp PKCS#7 files (`/p7`)
    pub pkcs: Option<String>,
    /// Timestamp even when the file is sealed (`/force`)
    pub force: bool,
    /// Suppress sealing-related warnings (`/nosealwarn`)
    pub no_seal_warning: bool,
}

static TIMESTAMP_FLAGS: &[FlagSpec<TimestampOptions>] = &[
    FlagSpec::value("url", "/t", |o: &TimestampOptions| o.url.clone()),
    FlagSpec::value("rfc_url", "/tr", |o: &TimestampOptions| o.rfc_url.clone()),
    FlagSpec::value("seal_url", "/tseal", |o: &TimestampOptions| o.seal_url.clone()),
    FlagSpec::value("algorithm", "/td", |o: &TimestampOptions| o.algorithm.clone()),
    FlagSpec::value("index", "/tp", |o: &TimestampOptions| {
        o.index.map(|i| i.to_string())
    }),
    FlagSpec::value("pkcs", "/p7", |o: &TimestampOptions| o.pkcs.clone()),
    FlagSpec::switch("force", "/force", |o: &TimestampOptions| o.force),
    FlagSpec::switch("no_seal_warning", "/nosealwarn", |o: &TimestampOptions| {
        o.no_seal_warning
    }),
];

impl FlagTable for TimestampOptions {
    const OPERATION: Operation = Operation::Timestamp;

    fn table() -> &'static [FlagSpec<Self>] {
        TIMESTAMP_FLAGS
    }
}

/// Options for `signtool catdb`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatdbOptions {
    /// Use the default catalog database (`/d`)
    pub default: bool,
    /// Catalog database GUID (`/g`)
    pub guid: Option<String>,
    /// Remove the catalog instead of adding it (`/r`)
    pub remove: bool,
    /// Generate a unique name for the catalog file if needed (`/u`)
    pub unique: bool,
}

static CATDB_FLAGS: &[FlagSpec<CatdbOptions>] = &[
    FlagSpec::switch("default", "/d", |o: &CatdbOptions| o.default),
    FlagSpec::value("guid", "/g", |o: &CatdbOptions| o.guid.clone()),
    FlagSpec::switch("remove", "/r", |o: &CatdbOptions| o.remove),
    FlagSpec::switch("unique", "/u", |o: &CatdbOptions| o.unique),
];

impl FlagTable for CatdbOptions {
    const OPERATION: Operation = Operation::Catdb;

    fn table() -> &'static [FlagSpec<Self>] {
        CATDB_FLAGS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{build_args, Arity, FlagRow};
    use crate::target::Target;
    use std::collections::HashSet;

    fn tokens(rows: &[FlagRow]) -> Vec<&'static str> {
        rows.iter().map(|r| r.token).collect()
    }

    #[test]
    fn test_sign_auto_with_certificate() {
        let options = SignOptions {
            auto: true,
            certificate: Some("cert.pfx".to_string()),
            ..Default::default()
        };
        let args = build_args(&options, &Target::from(["a.exe"]));
        assert_eq!(args, vec!["sign", "/a", "/f", "cert.pfx", "a.exe"]);
    }

    #[test]
    fn test_verify_all_methods_with_description() {
        let options = VerifyOptions {
            use_all_methods: true,
            show_description: true,
            ..Default::default()
        };
        let args = build_args(&options, &Target::from(["a.exe"]));
        assert_eq!(args, vec!["verify", "/a", "/d", "a.exe"]);
    }

    #[test]
    fn test_digest_true_uses_placeholder() {
        let options = SignOptions {
            digest: Some(DigestSource::Enabled(true)),
            ..Default::default()
        };
        let args = build_args(&options, &Target::from("a.exe"));
        assert_eq!(args, vec!["sign", "/dg", ".", "a.exe"]);
    }

    #[test]
    fn test_digest_directory_with_dependents() {
        let options = SignOptions {
            digest: Some(DigestSource::from("out")),
            digest_xml: true,
            digest_function: Some("meta".to_string()),
            digest_lib: Some("lib.dll".to_string()),
            ..Default::default()
        };
        let args = build_args(&options, &Target::from("a.exe"));
        assert_eq!(
            args,
            vec!["sign", "/dg", "out", "/dxml", "/dmdf", "meta", "/dlib", "lib.dll", "a.exe"]
        );
    }

    #[test]
    fn test_digest_dependents_dropped_without_digest() {
        let options = SignOptions {
            digest_xml: true,
            digest_function: Some("meta".to_string()),
            ..Default::default()
        };
        let args = build_args(&options, &Target::from("a.exe"));
        assert_eq!(args, vec!["sign", "a.exe"]);
    }

    #[test]
    fn test_digest_false_still_emits_placeholder() {
        let options = SignOptions {
            digest: Some(DigestSource::Enabled(false)),
            digest_xml: true,
            ..Default::default()
        };
        let args = build_args(&options, &Target::from("a.exe"));
        assert_eq!(args, vec!["sign", "/dg", ".", "/dxml", "a.exe"]);
    }

    #[test]
    fn test_pkcs_dependents() {
        let options = SignOptions {
            pkcs: Some("p7out".to_string()),
            pkcs_ce: Some("Embedded".to_string()),
            pkcs_oid: Some("1.3.6.1.4.1.311.79.1".to_string()),
            page_hashes: true,
            ..Default::default()
        };
        let args = build_args(&options, &Target::from("a.exe"));
        assert_eq!(
            args,
            vec![
                "sign",
                "/p7",
                "p7out",
                "/p7ce",
                "Embedded",
                "/p7co",
                "1.3.6.1.4.1.311.79.1",
                "/ph",
                "a.exe"
            ]
        );

        let orphaned = SignOptions {
            pkcs_ce: Some("Embedded".to_string()),
            pkcs_oid: Some("1.2.3".to_string()),
            ..Default::default()
        };
        let args = build_args(&orphaned, &Target::from("a.exe"));
        assert_eq!(args, vec!["sign", "a.exe"]);
    }

    #[test]
    fn test_sign_typical_rfc3161_invocation() {
        let options = SignOptions {
            algorithm: Some("sha256".to_string()),
            sha1: Some("ABCDEF".to_string()),
            rfc_timestamp: Some("http://timestamp.digicert.com".to_string()),
            timestamp_algo: Some("sha256".to_string()),
            description: Some("My App".to_string()),
            ..Default::default()
        };
        let args = build_args(&options, &Target::from(["a.exe", "b.dll"]));
        assert_eq!(
            args,
            vec![
                "sign",
                "/d",
                "My App",
                "/sha1",
                "ABCDEF",
                "/fd",
                "sha256",
                "/tr",
                "http://timestamp.digicert.com",
                "/td",
                "sha256",
                "a.exe",
                "b.dll"
            ]
        );
    }

    #[test]
    fn test_verify_numeric_index() {
        let options = VerifyOptions {
            index: Some(1),
            default_auth_policy: true,
            ..Default::default()
        };
        let args = build_args(&options, &Target::from("a.exe"));
        assert_eq!(args, vec!["verify", "/ds", "1", "/pa", "a.exe"]);
    }

    #[test]
    fn test_timestamp_flags_in_order() {
        let options = TimestampOptions {
            pkcs: Some("p7".to_string()),
            index: Some(0),
            algorithm: Some("sha256".to_string()),
            rfc_url: Some("http://ts".to_string()),
            ..Default::default()
        };
        let args = build_args(&options, &Target::from("a.exe"));
        assert_eq!(
            args,
            vec!["timestamp", "/tr", "http://ts", "/td", "sha256", "/tp", "0", "/p7", "p7", "a.exe"]
        );
    }

    #[test]
    fn test_catdb_flags() {
        let options = CatdbOptions {
            default: true,
            guid: Some("{F750E6C3-38EE-11D1-85E5-00C04FC295EE}".to_string()),
            remove: true,
            unique: true,
        };
        let args = build_args(&options, &Target::from("my.cat"));
        assert_eq!(
            args,
            vec![
                "catdb",
                "/d",
                "/g",
                "{F750E6C3-38EE-11D1-85E5-00C04FC295EE}",
                "/r",
                "/u",
                "my.cat"
            ]
        );
    }

    #[test]
    fn test_builder_is_deterministic() {
        let options = SignOptions {
            auto: true,
            store: Some("My".to_string()),
            digest: Some(DigestSource::Enabled(true)),
            ..Default::default()
        };
        let target = Target::from(["a.exe", "b.exe"]);
        assert_eq!(build_args(&options, &target), build_args(&options, &target));
    }

    #[test]
    fn test_switches_never_emit_values() {
        let mut options = VerifyOptions::default();
        options.verify_all_signatures = true;
        options.use_x64_kernel = true;
        let args = build_args(&options, &Target::from("a.sys"));
        assert_eq!(args, vec!["verify", "/all", "/kp", "a.sys"]);
    }

    #[test]
    fn test_targets_always_last() {
        let options = CatdbOptions {
            unique: true,
            ..Default::default()
        };
        let target = Target::from(["x.cat", "y.cat"]);
        let args = build_args(&options, &target);
        assert_eq!(&args[args.len() - 2..], &["x.cat", "y.cat"]);
    }

    #[test]
    fn test_sign_table_is_complete() {
        let expected = [
            "/a", "/as", "/uw", "/f", "/p", "/i", "/n", "/r", "/d", "/du", "/s", "/sm", "/sha1",
            "/csp", "/kc", "/c", "/ac", "/fd", "/u", "/t", "/tr", "/td", "/dg", "/dxml", "/dmdf",
            "/dlib", "/ds", "/p7", "/p7ce", "/p7co", "/ph", "/nph", "/rmc", "/seal", "/itos",
            "/force", "/nosealwarn", "/tseal", "/fdchw", "/tdchw",
        ];
        assert_eq!(tokens(&SignOptions::rows()), expected);
    }

    #[test]
    fn test_verify_table_is_complete() {
        let expected = [
            "/a", "/o", "/ds", "/hash", "/r", "/ag", "/c", "/ad", "/as", "/all", "/kp", "/ms",
            "/p7", "/ph", "/tw", "/pa", "/pg", "/d", "/bp", "/enclave", "/sl",
        ];
        assert_eq!(tokens(&VerifyOptions::rows()), expected);
    }

    #[test]
    fn test_timestamp_and_catdb_tables_are_complete() {
        assert_eq!(
            tokens(&TimestampOptions::rows()),
            ["/t", "/tr", "/tseal", "/td", "/tp", "/p7", "/force", "/nosealwarn"]
        );
        assert_eq!(tokens(&CatdbOptions::rows()), ["/d", "/g", "/r", "/u"]);
    }

    #[test]
    fn test_tokens_and_fields_unique_per_table() {
        for op in Operation::ALL {
            let rows = op.flag_rows();
            let tokens: HashSet<_> = rows.iter().map(|r| r.token).collect();
            let fields: HashSet<_> = rows.iter().map(|r| r.field).collect();
            assert_eq!(tokens.len(), rows.len(), "duplicate token in {}", op);
            assert_eq!(fields.len(), rows.len(), "duplicate field in {}", op);
        }
    }

    #[test]
    fn test_nested_rows_name_their_parent() {
        let rows = SignOptions::rows();
        let nested: Vec<_> = rows
            .iter()
            .filter_map(|r| r.parent.map(|p| (r.field, p)))
            .collect();
        assert_eq!(
            nested,
            vec![
                ("digest_xml", "digest"),
                ("digest_function", "digest"),
                ("pkcs_ce", "pkcs"),
                ("pkcs_oid", "pkcs"),
            ]
        );
        let digest = rows.iter().find(|r| r.field == "digest").unwrap();
        assert_eq!(digest.arity, Arity::Value);
    }

    #[test]
    fn test_sign_options_from_toml() {
        let options: SignOptions = toml::from_str(
            r#"
auto = true
certificate = "cert.pfx"
digest = true
"#,
        )
        .unwrap();
        assert!(options.auto);
        assert_eq!(options.certificate.as_deref(), Some("cert.pfx"));
        assert_eq!(options.digest, Some(DigestSource::Enabled(true)));

        let options: SignOptions = toml::from_str(r#"digest = "out""#).unwrap();
        assert_eq!(options.digest, Some(DigestSource::Directory("out".to_string())));
    }

    #[test]
    fn test_default_constructors() {
        assert_eq!(
            build_args(&SignOptions::automatic(), &Target::from("a.exe")),
            vec!["sign", "/a", "a.exe"]
        );
        assert_eq!(
            build_args(&VerifyOptions::all_methods(), &Target::from("a.exe")),
            vec!["verify", "/a", "a.exe"]
        );
    }
}

//! Built-in canonical organization table
//!
//! Covers the organizations that dominate AI/ML paper affiliations: big tech
//! labs, major universities across the US, UK, EU, Asia and Russia, and a
//! handful of independent research institutes. Everything else is left to
//! the ROR registry or the generative fallback.

use affilia_domain::{OrgType, OrganizationRecord};

fn org(
    canonical_name: &str,
    country: &str,
    country_code: &str,
    org_type: OrgType,
    variants: &[&str],
    aliases: &[&str],
) -> OrganizationRecord {
    OrganizationRecord {
        canonical_name: canonical_name.to_string(),
        country: country.to_string(),
        country_code: country_code.to_string(),
        org_type,
        variants: variants.iter().map(|s| s.to_string()).collect(),
        aliases: aliases.iter().map(|s| s.to_string()).collect(),
    }
}

/// The full built-in table. Order carries no meaning.
pub fn builtin_records() -> Vec<OrganizationRecord> {
    use OrgType::{Company, ResearchInstitute, University};

    vec![
        // Big tech
        org(
            "Google",
            "United States",
            "US",
            Company,
            &[
                "Google Research",
                "Google Brain",
                "Google AI",
                "Google Inc.",
                "Google LLC",
                "Google DeepMind",
            ],
            &["GOOG"],
        ),
        org(
            "DeepMind",
            "United Kingdom",
            "GB",
            Company,
            &[
                "DeepMind Technologies",
                "DeepMind Technologies Limited",
                "Google DeepMind",
            ],
            &[],
        ),
        org(
            "Meta",
            "United States",
            "US",
            Company,
            &[
                "Meta AI",
                "Meta Platforms",
                "Meta Platforms, Inc.",
                "Facebook",
                "Facebook AI Research",
                "Facebook AI",
                "FAIR",
            ],
            &["META"],
        ),
        org(
            "Microsoft",
            "United States",
            "US",
            Company,
            &[
                "Microsoft Research",
                "Microsoft Research Asia",
                "Microsoft Research Lab",
                "MSR",
                "Microsoft Corporation",
            ],
            &["MSFT"],
        ),
        org(
            "OpenAI",
            "United States",
            "US",
            Company,
            &["OpenAI LP", "OpenAI Inc."],
            &[],
        ),
        org(
            "Anthropic",
            "United States",
            "US",
            Company,
            &["Anthropic PBC"],
            &[],
        ),
        org(
            "NVIDIA",
            "United States",
            "US",
            Company,
            &["NVIDIA Corporation", "NVIDIA Research"],
            &["NVDA"],
        ),
        org(
            "Amazon",
            "United States",
            "US",
            Company,
            &[
                "Amazon Web Services",
                "AWS",
                "Amazon Science",
                "Amazon Research",
                "Amazon.com",
            ],
            &["AMZN"],
        ),
        org(
            "Apple",
            "United States",
            "US",
            Company,
            &["Apple Inc.", "Apple Machine Learning Research"],
            &["AAPL"],
        ),
        org(
            "IBM",
            "United States",
            "US",
            Company,
            &["IBM Research", "IBM Corporation", "International Business Machines"],
            &[],
        ),
        org(
            "Tencent",
            "China",
            "CN",
            Company,
            &["Tencent AI Lab", "Tencent Holdings"],
            &[],
        ),
        org(
            "Alibaba",
            "China",
            "CN",
            Company,
            &["Alibaba Group", "Alibaba DAMO Academy", "DAMO Academy"],
            &["BABA"],
        ),
        org(
            "Baidu",
            "China",
            "CN",
            Company,
            &["Baidu Research", "Baidu Inc."],
            &[],
        ),
        org(
            "ByteDance",
            "China",
            "CN",
            Company,
            &["ByteDance AI Lab", "TikTok"],
            &[],
        ),
        org(
            "Huawei",
            "China",
            "CN",
            Company,
            &["Huawei Technologies", "Huawei Noah's Ark Lab"],
            &[],
        ),
        org(
            "Samsung",
            "South Korea",
            "KR",
            Company,
            &["Samsung Research", "Samsung Electronics", "Samsung AI Center"],
            &[],
        ),
        // US universities
        org(
            "Stanford University",
            "United States",
            "US",
            University,
            &["Stanford", "Stanford CS", "Stanford NLP", "Stanford AI Lab"],
            &[],
        ),
        org(
            "Massachusetts Institute of Technology",
            "United States",
            "US",
            University,
            &["MIT", "M.I.T.", "MIT CSAIL"],
            &["MIT"],
        ),
        org(
            "University of California, Berkeley",
            "United States",
            "US",
            University,
            &["UC Berkeley", "UCB", "Berkeley", "Berkeley AI Research", "BAIR"],
            &[],
        ),
        org(
            "Carnegie Mellon University",
            "United States",
            "US",
            University,
            &["CMU", "Carnegie Mellon"],
            &["CMU"],
        ),
        org(
            "Harvard University",
            "United States",
            "US",
            University,
            &["Harvard"],
            &[],
        ),
        org(
            "Princeton University",
            "United States",
            "US",
            University,
            &["Princeton"],
            &[],
        ),
        org(
            "California Institute of Technology",
            "United States",
            "US",
            University,
            &["Caltech", "Cal Tech"],
            &["Caltech"],
        ),
        org(
            "Cornell University",
            "United States",
            "US",
            University,
            &["Cornell", "Cornell Tech"],
            &[],
        ),
        org(
            "New York University",
            "United States",
            "US",
            University,
            &["NYU", "N.Y.U."],
            &["NYU"],
        ),
        org(
            "University of California, Los Angeles",
            "United States",
            "US",
            University,
            &["UCLA"],
            &["UCLA"],
        ),
        org(
            "University of Washington",
            "United States",
            "US",
            University,
            &["UW", "U Washington"],
            &[],
        ),
        org(
            "University of Illinois Urbana-Champaign",
            "United States",
            "US",
            University,
            &["UIUC", "University of Illinois", "UIUC CS"],
            &["UIUC"],
        ),
        org(
            "Georgia Institute of Technology",
            "United States",
            "US",
            University,
            &["Georgia Tech", "GaTech"],
            &[],
        ),
        // UK universities
        org(
            "University of Oxford",
            "United Kingdom",
            "GB",
            University,
            &["Oxford", "Oxford University"],
            &[],
        ),
        org(
            "University of Cambridge",
            "United Kingdom",
            "GB",
            University,
            &["Cambridge", "Cambridge University"],
            &[],
        ),
        org(
            "Imperial College London",
            "United Kingdom",
            "GB",
            University,
            &["Imperial", "Imperial College"],
            &[],
        ),
        org(
            "University College London",
            "United Kingdom",
            "GB",
            University,
            &["UCL"],
            &["UCL"],
        ),
        org(
            "University of Edinburgh",
            "United Kingdom",
            "GB",
            University,
            &["Edinburgh"],
            &[],
        ),
        // Chinese universities
        org(
            "Tsinghua University",
            "China",
            "CN",
            University,
            &["Tsinghua", "THU"],
            &[],
        ),
        org(
            "Peking University",
            "China",
            "CN",
            University,
            &["Peking", "PKU", "Beijing University"],
            &["PKU"],
        ),
        org(
            "Zhejiang University",
            "China",
            "CN",
            University,
            &["Zhejiang", "ZJU"],
            &["ZJU"],
        ),
        org(
            "Shanghai Jiao Tong University",
            "China",
            "CN",
            University,
            &["SJTU", "Shanghai Jiao Tong"],
            &["SJTU"],
        ),
        org("Fudan University", "China", "CN", University, &["Fudan"], &[]),
        org(
            "The Chinese University of Hong Kong",
            "Hong Kong",
            "HK",
            University,
            &["CUHK", "Chinese University of Hong Kong"],
            &["CUHK"],
        ),
        org(
            "The University of Hong Kong",
            "Hong Kong",
            "HK",
            University,
            &["HKU", "University of Hong Kong"],
            &["HKU"],
        ),
        // Canadian universities
        org(
            "University of Toronto",
            "Canada",
            "CA",
            University,
            &["U of T", "UofT"],
            &[],
        ),
        org(
            "Mila - Quebec AI Institute",
            "Canada",
            "CA",
            ResearchInstitute,
            &["Mila", "MILA"],
            &[],
        ),
        org(
            "McGill University",
            "Canada",
            "CA",
            University,
            &["McGill"],
            &[],
        ),
        org(
            "University of Waterloo",
            "Canada",
            "CA",
            University,
            &["Waterloo", "UWaterloo"],
            &[],
        ),
        // EU universities
        org(
            "ETH Zurich",
            "Switzerland",
            "CH",
            University,
            &["ETH", "ETHZ", "ETH Zürich"],
            &["ETH"],
        ),
        org(
            "EPFL",
            "Switzerland",
            "CH",
            University,
            &["École Polytechnique Fédérale de Lausanne"],
            &["EPFL"],
        ),
        org(
            "Max Planck Institute for Informatics",
            "Germany",
            "DE",
            ResearchInstitute,
            &["MPI", "Max Planck", "MPI Informatics"],
            &[],
        ),
        org(
            "Technical University of Munich",
            "Germany",
            "DE",
            University,
            &["TUM", "TU Munich"],
            &["TUM"],
        ),
        org("Inria", "France", "FR", ResearchInstitute, &["INRIA"], &[]),
        // Asian universities
        org(
            "KAIST",
            "South Korea",
            "KR",
            University,
            &["Korea Advanced Institute of Science and Technology"],
            &["KAIST"],
        ),
        org(
            "Seoul National University",
            "South Korea",
            "KR",
            University,
            &["SNU"],
            &["SNU"],
        ),
        org(
            "The University of Tokyo",
            "Japan",
            "JP",
            University,
            &["University of Tokyo", "UTokyo"],
            &[],
        ),
        org(
            "National University of Singapore",
            "Singapore",
            "SG",
            University,
            &["NUS"],
            &["NUS"],
        ),
        org(
            "Nanyang Technological University",
            "Singapore",
            "SG",
            University,
            &["NTU Singapore", "NTU"],
            &[],
        ),
        // Russian universities
        org(
            "Moscow Institute of Physics and Technology",
            "Russia",
            "RU",
            University,
            &["MIPT", "МФТИ", "Phystech", "Физтех"],
            &["MIPT", "МФТИ"],
        ),
        org(
            "HSE University",
            "Russia",
            "RU",
            University,
            &["Higher School of Economics", "HSE", "ВШЭ"],
            &["HSE"],
        ),
        org(
            "Lomonosov Moscow State University",
            "Russia",
            "RU",
            University,
            &["MSU", "Moscow State University", "МГУ"],
            &["MSU", "МГУ"],
        ),
        org(
            "Skolkovo Institute of Science and Technology",
            "Russia",
            "RU",
            University,
            &["Skoltech", "Сколтех"],
            &["Skoltech"],
        ),
        // Research labs
        org(
            "Allen Institute for AI",
            "United States",
            "US",
            ResearchInstitute,
            &["AI2", "Allen AI"],
            &["AI2"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_well_formed() {
        let records = builtin_records();
        assert!(records.len() >= 50);

        for record in &records {
            assert!(!record.canonical_name.trim().is_empty());
            assert!(!record.country.trim().is_empty());
            assert_eq!(record.country_code.len(), 2, "bad code for {}", record.canonical_name);
        }
    }

    #[test]
    fn test_canonical_names_are_unique() {
        let records = builtin_records();
        let mut names: Vec<&str> = records.iter().map(|r| r.canonical_name.as_str()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(names.len(), before);
    }
}

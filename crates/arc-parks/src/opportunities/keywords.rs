use super::domain::OpportunityKind;

pub(crate) struct KeywordGroup {
    pub keywords: &'static [&'static str],
    pub opportunity: OpportunityKind,
    pub flag: Option<(&'static str, &'static str)>,
}

pub(crate) const KEYWORD_GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["genomics", "biomedical", "life science", "sequencing", "clinical"],
        opportunity: OpportunityKind::LifeSciencesData,
        flag: Some((
            "Life sciences sector",
            "data-intensive research requires resilient, high-bandwidth connectivity with low \
             latency for instrument connectivity and remote collaboration",
        )),
    },
    KeywordGroup {
        keywords: &["space", "energy", "defence", "nuclear", "fusion", "itar"],
        opportunity: OpportunityKind::SecureNetwork,
        flag: Some((
            "Sensitive sector",
            "space/energy/defence tenants have elevated network security requirements \
             including potential ITAR/export control compliance",
        )),
    },
    KeywordGroup {
        keywords: &["incubator", "early-stage", "spinout", "accelerator"],
        opportunity: OpportunityKind::StartupPackages,
        flag: None,
    },
    KeywordGroup {
        keywords: &["ai", "gpu", "hpc", "deep tech"],
        opportunity: OpportunityKind::ComputeBackhaul,
        flag: Some((
            "Compute-intensive tenants",
            "AI and HPC workloads drive sustained high-volume traffic and benefit from \
             diverse, low-latency routes",
        )),
    },
];

impl KeywordGroup {
    /// Plain substring match; `haystack` must already be lower-case.
    pub(crate) fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|keyword| haystack.contains(keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag_line(kind: OpportunityKind) -> Option<String> {
        group(kind)
            .flag
            .map(|(title, detail)| format!("{title}: {detail}"))
    }

    fn group(kind: OpportunityKind) -> &'static KeywordGroup {
        KEYWORD_GROUPS
            .iter()
            .find(|group| group.opportunity == kind)
            .expect("group exists")
    }

    #[test]
    fn short_keywords_match_inside_words() {
        let compute = group(OpportunityKind::ComputeBackhaul);
        assert!(compute.matches("ai and robotics"));
        assert!(compute.matches("openai-style labs"));
        assert!(compute.matches("facility maintenance"));
        assert!(compute.matches("chpc"));
        assert!(!compute.matches("materials, engineering"));
    }

    #[test]
    fn long_keywords_match_substrings() {
        let life = group(OpportunityKind::LifeSciencesData);
        assert!(life.matches("life sciences and medtech"));
        assert!(life.matches("biomedical engineering"));
        assert!(!life.matches("genome editing"));
    }

    #[test]
    fn sector_flags_read_as_title_and_detail() {
        assert_eq!(
            flag_line(OpportunityKind::LifeSciencesData).as_deref(),
            Some(
                "Life sciences sector: data-intensive research requires resilient, high-bandwidth \
                 connectivity with low latency for instrument connectivity and remote collaboration"
            )
        );
        assert_eq!(
            flag_line(OpportunityKind::SecureNetwork).as_deref(),
            Some(
                "Sensitive sector: space/energy/defence tenants have elevated network security \
                 requirements including potential ITAR/export control compliance"
            )
        );
        assert_eq!(flag_line(OpportunityKind::StartupPackages), None);
    }
}

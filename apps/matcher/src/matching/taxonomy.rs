//! Skill Taxonomy — canonical skill names, their aliases, and the families they
//! are organized into.
//!
//! Built once at startup from declarative family definitions into a single
//! alias → canonical table. Canonicals live in one arena (`Vec`) and every
//! alias maps to an index into it, so resolution is a single hash lookup.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::matching::error::ConfigError;
use crate::matching::normalize::normalize_skill;

/// A named group of canonical skills, each with its accepted aliases.
/// This is also the on-disk shape of `TAXONOMY_PATH`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillFamily {
    pub family: String,
    pub skills: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
struct CanonicalSkill {
    name: String,
    family: String,
    aliases: Vec<String>,
}

/// Immutable alias → canonical resolution table.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    skills: Vec<CanonicalSkill>,
    index: HashMap<String, usize>,
}

impl SkillTaxonomy {
    /// Builds the table, rejecting any alias that would resolve to two
    /// different canonical names. A repeated alias under the same canonical
    /// is harmless and collapses into one entry.
    pub fn from_families(families: &[SkillFamily]) -> Result<Self, ConfigError> {
        let mut skills: Vec<CanonicalSkill> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for family in families {
            for (canonical_raw, aliases) in &family.skills {
                let canonical = normalize_skill(canonical_raw);
                if canonical.is_empty() {
                    return Err(ConfigError::EmptySkill(family.family.clone()));
                }

                // A canonical listed in two families is merged into the first.
                let slot = match index.get(&canonical) {
                    Some(&existing) if skills[existing].name == canonical => existing,
                    Some(&existing) => {
                        return Err(ConfigError::DuplicateAlias {
                            alias: canonical,
                            first: skills[existing].name.clone(),
                            second: normalize_skill(canonical_raw),
                        })
                    }
                    None => {
                        skills.push(CanonicalSkill {
                            name: canonical.clone(),
                            family: family.family.clone(),
                            aliases: Vec::new(),
                        });
                        let slot = skills.len() - 1;
                        index.insert(canonical.clone(), slot);
                        slot
                    }
                };

                for alias_raw in aliases {
                    let alias = normalize_skill(alias_raw);
                    if alias.is_empty() {
                        return Err(ConfigError::EmptySkill(family.family.clone()));
                    }
                    match index.get(&alias) {
                        Some(&existing) if existing == slot => {}
                        Some(&existing) => {
                            return Err(ConfigError::DuplicateAlias {
                                alias,
                                first: skills[existing].name.clone(),
                                second: skills[slot].name.clone(),
                            })
                        }
                        None => {
                            index.insert(alias.clone(), slot);
                            skills[slot].aliases.push(alias);
                        }
                    }
                }
            }
        }

        Ok(Self { skills, index })
    }

    /// Canonical name for a raw skill string, or `None` if it is unmapped.
    /// Unmapped tokens are still usable by the lexical matching tiers.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.resolve_normalized(&normalize_skill(token))
    }

    /// Same as [`resolve`](Self::resolve) for an already-normalized token.
    pub fn resolve_normalized(&self, normalized: &str) -> Option<&str> {
        self.index
            .get(normalized)
            .map(|&slot| self.skills[slot].name.as_str())
    }

    /// Family name a skill (canonical or alias) belongs to.
    pub fn family_of(&self, token: &str) -> Option<&str> {
        self.index
            .get(&normalize_skill(token))
            .map(|&slot| self.skills[slot].family.as_str())
    }

    /// Canonical name followed by every registered alias. For an unmapped
    /// token this is just the normalized token itself.
    pub fn equivalents(&self, token: &str) -> Vec<String> {
        let normalized = normalize_skill(token);
        match self.index.get(&normalized) {
            Some(&slot) => {
                let skill = &self.skills[slot];
                std::iter::once(skill.name.clone())
                    .chain(skill.aliases.iter().cloned())
                    .collect()
            }
            None if normalized.is_empty() => vec![],
            None => vec![normalized],
        }
    }

    /// Number of canonical skills.
    pub fn len(&self) -> usize {
        self.skills.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Default taxonomy data
// ────────────────────────────────────────────────────────────────────────────

type FamilyTable = (&'static str, &'static [(&'static str, &'static [&'static str])]);

/// NOTE: an alias may appear under one canonical only. `from_families`
/// rejects the table otherwise.
const DEFAULT_FAMILIES: &[FamilyTable] = &[
    (
        "programming",
        &[
            ("python", &["py", "python3", "python 3"]),
            ("javascript", &["js", "ecmascript", "es6"]),
            ("typescript", &["ts"]),
            ("java", &["core java", "j2ee", "openjdk"]),
            ("c++", &["cpp", "c plus plus"]),
            ("c#", &["csharp", "c sharp", ".net", "dotnet"]),
            ("golang", &["go", "go lang"]),
            ("rust", &["rustlang", "rust lang"]),
            ("kotlin", &["kotlin jvm"]),
            ("swift", &["ios swift"]),
            ("objective-c", &["objc", "objective c"]),
            ("ruby", &["ruby lang"]),
            ("php", &["php7", "php8"]),
            ("scala", &[]),
            ("r", &["rstudio", "r language"]),
            ("bash", &["shell", "shell scripting", "bash scripting"]),
        ],
    ),
    (
        "web_frontend",
        &[
            ("react", &["reactjs", "react.js", "react js", "jsx", "react native"]),
            ("angular", &["angularjs", "angular.js", "angular 2"]),
            ("vue", &["vuejs", "vue.js", "vue 3"]),
            ("next.js", &["nextjs", "next js"]),
            ("svelte", &["sveltekit"]),
            ("redux", &["redux toolkit"]),
            ("html", &["html5"]),
            ("css", &["css3"]),
            ("sass", &["scss"]),
            ("tailwind", &["tailwindcss", "tailwind css"]),
            ("bootstrap", &["bootstrap 5"]),
        ],
    ),
    (
        "backend",
        &[
            ("nodejs", &["node.js", "node", "node js"]),
            ("express", &["expressjs", "express.js"]),
            ("django", &["django rest framework", "drf"]),
            ("flask", &["python flask"]),
            ("fastapi", &["fast api"]),
            ("spring", &["spring boot", "springboot", "spring framework"]),
            ("ruby on rails", &["rails", "ror"]),
            ("laravel", &["php laravel"]),
            ("asp.net", &["asp.net core", "asp net"]),
            ("rest", &["restful", "rest api", "restful api"]),
            ("graphql", &["gql"]),
        ],
    ),
    (
        "databases",
        &[
            ("sql", &["t-sql", "tsql", "pl/sql", "structured query language"]),
            ("mysql", &["mariadb", "my sql"]),
            ("postgresql", &["postgres", "pg", "postgre sql"]),
            ("mongodb", &["mongo", "mongo db"]),
            ("redis", &["redis cache"]),
            ("cassandra", &["apache cassandra"]),
            ("elasticsearch", &["elastic search", "opensearch", "elk"]),
            ("sqlite", &["sqlite3"]),
            ("oracle", &["oracle db", "oracle database"]),
            ("sql server", &["mssql", "ms sql", "microsoft sql server"]),
            ("dynamodb", &["dynamo db", "amazon dynamodb"]),
            ("firebase", &["firestore"]),
        ],
    ),
    (
        "cloud_devops",
        &[
            (
                "aws",
                &["amazon web services", "ec2", "s3", "lambda", "cloudformation"],
            ),
            ("azure", &["microsoft azure", "ms azure"]),
            ("gcp", &["google cloud", "google cloud platform", "bigquery"]),
            ("kubernetes", &["k8s", "eks", "aks", "gke"]),
            ("docker", &["containers", "containerization", "docker compose"]),
            ("jenkins", &["jenkins pipeline"]),
            (
                "ci/cd",
                &["continuous integration", "continuous delivery", "continuous deployment"],
            ),
            ("git", &["github", "gitlab", "bitbucket", "version control"]),
            ("terraform", &["infrastructure as code", "iac"]),
            ("ansible", &["configuration management"]),
            ("helm", &["helm charts"]),
            ("linux", &["unix", "ubuntu", "centos", "rhel", "debian"]),
        ],
    ),
    (
        "data_ml",
        &[
            ("machine learning", &["ml"]),
            ("deep learning", &["neural networks"]),
            ("tensorflow", &["keras", "tf"]),
            ("pytorch", &["torch"]),
            ("scikit-learn", &["sklearn", "scikit learn"]),
            ("pandas", &[]),
            ("numpy", &[]),
            ("spark", &["apache spark", "pyspark"]),
            ("hadoop", &["hdfs", "mapreduce"]),
            ("airflow", &["apache airflow"]),
            ("tableau", &[]),
            ("power bi", &["powerbi"]),
            ("nlp", &["natural language processing"]),
            ("data analysis", &["data analytics", "analytics"]),
            ("excel", &["microsoft excel", "ms excel", "spreadsheets"]),
        ],
    ),
    (
        "qa_testing",
        &[
            ("selenium", &["selenium webdriver"]),
            ("pytest", &[]),
            ("junit", &["junit5"]),
            ("postman", &["api testing"]),
            ("cucumber", &["bdd", "behavior driven development"]),
            (
                "test automation",
                &["automation testing", "qa automation", "automated testing"],
            ),
            ("jira", &["jira software"]),
        ],
    ),
    (
        "business",
        &[
            ("agile", &["scrum", "kanban", "agile methodology"]),
            ("project management", &["project planning", "pm"]),
            ("communication", &["communication skills", "interpersonal skills"]),
            ("leadership", &["team leadership"]),
            ("team management", &["people management"]),
            ("problem solving", &["analytical thinking", "critical thinking"]),
            ("stakeholder management", &["stakeholder engagement"]),
            ("time management", &["prioritization"]),
        ],
    ),
    (
        "human_resources",
        &[
            (
                "human resources",
                &["hr", "hrm", "human resource management", "hr management"],
            ),
            (
                "recruitment",
                &["recruiting", "talent acquisition", "hiring", "sourcing"],
            ),
            (
                "payroll",
                &["payroll management", "payroll processing", "payroll administration"],
            ),
            ("onboarding", &["induction", "employee onboarding"]),
            ("performance management", &["performance appraisal", "appraisal"]),
        ],
    ),
    (
        "sales_marketing",
        &[
            ("sales", &["b2b sales", "b2c sales", "sales management"]),
            ("crm", &["customer relationship management", "hubspot"]),
            ("salesforce", &["sfdc"]),
            ("business development", &["bd"]),
            ("lead generation", &["prospecting"]),
            ("digital marketing", &["online marketing"]),
            ("seo", &["search engine optimization"]),
            ("sem", &["search engine marketing", "ppc"]),
            ("social media marketing", &["social media", "smm"]),
            ("content marketing", &["content writing", "copywriting"]),
        ],
    ),
    (
        "finance",
        &[
            ("accounting", &["bookkeeping", "financial accounting"]),
            ("financial analysis", &["financial modeling", "financial modelling"]),
            ("budgeting", &["budget planning"]),
            ("tax", &["taxation", "tax preparation"]),
            ("audit", &["internal audit", "external audit", "auditing"]),
            ("sap", &["sap erp"]),
            ("quickbooks", &[]),
        ],
    ),
    (
        "project_management",
        &[
            ("confluence", &["wiki", "documentation"]),
            ("risk management", &["project risk", "risk assessment"]),
            ("resource management", &["resource planning", "team allocation"]),
            ("asana", &["task management"]),
            ("monday.com", &["monday"]),
            ("scheduling", &["timeline management", "project scheduling"]),
        ],
    ),
    (
        "supply_chain",
        &[
            ("supply chain", &["supply chain management", "scm"]),
            ("logistics", &["transportation", "transportation management"]),
            (
                "procurement",
                &["purchasing", "supplier management", "strategic sourcing"],
            ),
            (
                "inventory management",
                &["stock management", "inventory control", "inventory"],
            ),
            ("warehouse management", &["warehousing", "warehouse operations", "wms"]),
            ("vendor management", &["vendor relations", "supplier relations"]),
            (
                "demand planning",
                &["demand forecasting", "forecasting", "supply planning"],
            ),
        ],
    ),
    (
        "healthcare",
        &[
            ("nursing", &["registered nurse", "rn", "clinical nursing"]),
            ("patient care", &["patient management", "bedside care"]),
            (
                "healthcare management",
                &["health management", "hospital management", "hospital administration"],
            ),
            ("medical coding", &["medical billing", "icd-10", "medical records"]),
            ("pharmacy", &["pharmacist", "dispensing"]),
            ("radiology", &["medical imaging", "x-ray"]),
            ("laboratory", &["lab", "lab testing", "pathology"]),
            ("clinical skills", &["clinical"]),
        ],
    ),
    (
        "education_training",
        &[
            ("teaching", &["instruction", "classroom teaching", "classroom management"]),
            ("curriculum development", &["curriculum design", "course design"]),
            ("instructional design", &["learning design"]),
            ("elearning", &["e-learning", "online training", "digital learning"]),
            (
                "training delivery",
                &["training", "corporate training", "l&d", "learning and development"],
            ),
        ],
    ),
    (
        "customer_service",
        &[
            (
                "customer service",
                &["customer care", "client service", "call center", "call centre"],
            ),
            ("customer support", &["helpdesk", "help desk", "service desk"]),
            ("technical support", &["tech support", "it support", "troubleshooting"]),
            (
                "customer experience",
                &["cx", "customer satisfaction", "service quality"],
            ),
            ("ticketing", &["ticket management", "ticketing system", "zendesk", "freshdesk"]),
            ("customer success", &["customer retention", "account management"]),
            ("live chat support", &["chat support", "live chat"]),
        ],
    ),
    (
        "legal",
        &[
            ("legal", &["law", "legal compliance", "legal advisory"]),
            ("compliance", &["regulatory compliance", "regulatory affairs"]),
            (
                "contract management",
                &["contract law", "contract negotiation", "contract drafting", "contracts"],
            ),
            ("intellectual property", &["ip", "patents", "trademarks"]),
            ("litigation", &["civil litigation", "dispute resolution"]),
            ("legal research", &["case law research", "legal writing"]),
            ("data privacy", &["gdpr", "ccpa", "data protection"]),
        ],
    ),
    (
        "networking",
        &[
            (
                "networking",
                &["network administration", "network engineering", "lan", "wan"],
            ),
            ("cisco", &["ccna", "ccnp", "cisco ios"]),
            ("tcp/ip", &["networking protocols", "tcp ip", "dns", "dhcp"]),
            ("network security", &["firewalls", "firewall", "vpn"]),
            ("windows server", &["active directory", "windows administration"]),
        ],
    ),
];

/// The built-in skill families.
pub fn default_families() -> Vec<SkillFamily> {
    DEFAULT_FAMILIES
        .iter()
        .map(|(family, skills)| SkillFamily {
            family: family.to_string(),
            skills: skills
                .iter()
                .map(|(canonical, aliases)| {
                    (
                        canonical.to_string(),
                        aliases.iter().map(|a| a.to_string()).collect(),
                    )
                })
                .collect(),
        })
        .collect()
}

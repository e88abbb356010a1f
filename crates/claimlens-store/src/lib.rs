//! Claimlens Storage Layer
//!
//! SQLite persistence for companies, transcripts, claims, financial
//! records, verification results, and discrepancy patterns.
//!
//! # Architecture
//!
//! - One [`SqliteStore`] per thread (SQLite connections are not
//!   thread-safe); concurrent workers each open their own handle
//! - Claim ids are stored as 16-byte blobs
//! - Flag and evidence lists are stored as JSON text columns
//! - A claim's verification is first-write-wins: re-verifying an
//!   already-verified claim is a no-op
//! - A company's pattern set is replaced atomically inside one
//!   transaction
//!
//! # Examples
//!
//! ```no_run
//! use claimlens_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for ingest and verification queries
//! ```

#![warn(missing_docs)]

use std::collections::BTreeMap;
use std::path::Path;

use claimlens_domain::traits::{FinancialRecordStore, PatternStore};
use claimlens_domain::{
    Claim, ClaimId, CompanyId, ComparisonPeriod, DiscrepancyPattern, FinancialRecord,
    FiscalPeriod, MetricType, MisleadingFlag, PatternType, TranscriptId, Unit, Verdict,
    VerificationResult, VerifiedClaim,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Row referenced something that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored data failed to decode
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Uniqueness constraint would be violated
    #[error("Duplicate: {0}")]
    Duplicate(String),
}

/// A company row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    /// Database-assigned id
    pub id: CompanyId,
    /// Ticker symbol
    pub ticker: String,
    /// Company name
    pub name: String,
    /// Sector, if known
    pub sector: Option<String>,
}

/// A claim awaiting verification, with the context needed to verify it
#[derive(Debug, Clone, PartialEq)]
pub struct UnverifiedClaim {
    /// The claim itself
    pub claim: Claim,
    /// Company the transcript belongs to
    pub company_id: CompanyId,
    /// Fiscal period of the transcript
    pub period: FiscalPeriod,
}

/// SQLite-backed store for the claim-auditing pipeline
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    // ── codecs ───────────────────────────────────────────────────────

    fn claim_id_to_bytes(id: ClaimId) -> Vec<u8> {
        id.value().to_be_bytes().to_vec()
    }

    fn bytes_to_claim_id(bytes: &[u8]) -> Result<ClaimId, StoreError> {
        if bytes.len() != 16 {
            return Err(StoreError::InvalidData(format!(
                "Expected 16 bytes for ClaimId, got {}",
                bytes.len()
            )));
        }
        let mut arr = [0u8; 16];
        arr.copy_from_slice(bytes);
        Ok(ClaimId::from_value(u128::from_be_bytes(arr)))
    }

    fn flags_to_json(flags: &[MisleadingFlag]) -> Result<String, StoreError> {
        serde_json::to_string(flags)
            .map_err(|e| StoreError::InvalidData(format!("Flag encoding failed: {}", e)))
    }

    fn json_to_flags(json: &str) -> Result<Vec<MisleadingFlag>, StoreError> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidData(format!("Flag decoding failed: {}", e)))
    }

    fn strings_to_json(items: &[String]) -> Result<String, StoreError> {
        serde_json::to_string(items)
            .map_err(|e| StoreError::InvalidData(format!("List encoding failed: {}", e)))
    }

    fn json_to_strings(json: &str) -> Result<Vec<String>, StoreError> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidData(format!("List decoding failed: {}", e)))
    }

    // ── companies ────────────────────────────────────────────────────

    /// Insert a company, or return the existing row for its ticker
    pub fn upsert_company(
        &mut self,
        ticker: &str,
        name: &str,
        sector: Option<&str>,
    ) -> Result<Company, StoreError> {
        self.conn.execute(
            "INSERT INTO companies (ticker, name, sector) VALUES (?1, ?2, ?3)
             ON CONFLICT(ticker) DO UPDATE SET name = excluded.name,
                                               sector = excluded.sector",
            params![ticker, name, sector],
        )?;
        self.get_company(ticker)?
            .ok_or_else(|| StoreError::NotFound(format!("company {}", ticker)))
    }

    /// Fetch a company by ticker
    pub fn get_company(&self, ticker: &str) -> Result<Option<Company>, StoreError> {
        let company = self
            .conn
            .query_row(
                "SELECT id, ticker, name, sector FROM companies WHERE ticker = ?1",
                params![ticker],
                Self::row_to_company,
            )
            .optional()?;
        Ok(company)
    }

    /// All companies, ordered by ticker
    pub fn companies(&self) -> Result<Vec<Company>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, ticker, name, sector FROM companies ORDER BY ticker")?;
        let companies = stmt
            .query_map([], Self::row_to_company)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(companies)
    }

    fn row_to_company(row: &Row<'_>) -> rusqlite::Result<Company> {
        Ok(Company {
            id: CompanyId(row.get(0)?),
            ticker: row.get(1)?,
            name: row.get(2)?,
            sector: row.get(3)?,
        })
    }

    // ── transcripts ──────────────────────────────────────────────────

    /// Insert a transcript, or return the existing id for its quarter
    pub fn upsert_transcript(
        &mut self,
        company: CompanyId,
        period: FiscalPeriod,
        call_date: Option<&str>,
        full_text: &str,
    ) -> Result<TranscriptId, StoreError> {
        self.conn.execute(
            "INSERT INTO transcripts (company_id, year, quarter, call_date, full_text)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(company_id, year, quarter) DO NOTHING",
            params![company.0, period.year, period.quarter, call_date, full_text],
        )?;
        let id: i64 = self.conn.query_row(
            "SELECT id FROM transcripts
             WHERE company_id = ?1 AND year = ?2 AND quarter = ?3",
            params![company.0, period.year, period.quarter],
            |row| row.get(0),
        )?;
        Ok(TranscriptId(id))
    }

    // ── financial records ────────────────────────────────────────────

    /// Insert one quarter's financial snapshot
    ///
    /// Records are immutable once ingested: inserting a second snapshot
    /// for the same (company, period) is a duplicate error.
    pub fn insert_financial_record(
        &mut self,
        record: &FinancialRecord,
    ) -> Result<(), StoreError> {
        let exists: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM financial_data
                 WHERE company_id = ?1 AND year = ?2 AND quarter = ?3",
                params![record.company_id.0, record.period.year, record.period.quarter],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if exists {
            return Err(StoreError::Duplicate(format!(
                "financial data for company {} {}",
                record.company_id,
                record.period.label()
            )));
        }

        self.conn.execute(
            "INSERT INTO financial_data (
                company_id, year, quarter,
                revenue, cost_of_revenue, gross_profit, operating_income,
                operating_expenses, net_income, eps, eps_diluted, ebitda,
                research_and_development, selling_general_admin,
                interest_expense, income_tax_expense,
                operating_cash_flow, capital_expenditure, free_cash_flow,
                total_assets, total_liabilities, total_debt,
                cash_and_equivalents, shareholders_equity
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                       ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22,
                       ?23, ?24)",
            params![
                record.company_id.0,
                record.period.year,
                record.period.quarter,
                record.revenue,
                record.cost_of_revenue,
                record.gross_profit,
                record.operating_income,
                record.operating_expenses,
                record.net_income,
                record.eps,
                record.eps_diluted,
                record.ebitda,
                record.research_and_development,
                record.selling_general_admin,
                record.interest_expense,
                record.income_tax_expense,
                record.operating_cash_flow,
                record.capital_expenditure,
                record.free_cash_flow,
                record.total_assets,
                record.total_liabilities,
                record.total_debt,
                record.cash_and_equivalents,
                record.shareholders_equity,
            ],
        )?;
        Ok(())
    }

    fn row_to_financial_record(row: &Row<'_>) -> rusqlite::Result<FinancialRecord> {
        let mut record = FinancialRecord::empty(
            CompanyId(row.get(0)?),
            FiscalPeriod { year: row.get(1)?, quarter: row.get(2)? },
        );
        record.revenue = row.get(3)?;
        record.cost_of_revenue = row.get(4)?;
        record.gross_profit = row.get(5)?;
        record.operating_income = row.get(6)?;
        record.operating_expenses = row.get(7)?;
        record.net_income = row.get(8)?;
        record.eps = row.get(9)?;
        record.eps_diluted = row.get(10)?;
        record.ebitda = row.get(11)?;
        record.research_and_development = row.get(12)?;
        record.selling_general_admin = row.get(13)?;
        record.interest_expense = row.get(14)?;
        record.income_tax_expense = row.get(15)?;
        record.operating_cash_flow = row.get(16)?;
        record.capital_expenditure = row.get(17)?;
        record.free_cash_flow = row.get(18)?;
        record.total_assets = row.get(19)?;
        record.total_liabilities = row.get(20)?;
        record.total_debt = row.get(21)?;
        record.cash_and_equivalents = row.get(22)?;
        record.shareholders_equity = row.get(23)?;
        Ok(record)
    }

    const FINANCIAL_COLUMNS: &'static str = "company_id, year, quarter, revenue, \
        cost_of_revenue, gross_profit, operating_income, operating_expenses, \
        net_income, eps, eps_diluted, ebitda, research_and_development, \
        selling_general_admin, interest_expense, income_tax_expense, \
        operating_cash_flow, capital_expenditure, free_cash_flow, total_assets, \
        total_liabilities, total_debt, cash_and_equivalents, shareholders_equity";

    // ── claims ───────────────────────────────────────────────────────

    /// Insert an extracted claim
    pub fn insert_claim(&mut self, claim: &Claim) -> Result<(), StoreError> {
        let id_bytes = Self::claim_id_to_bytes(claim.id);
        self.conn.execute(
            "INSERT INTO claims (
                id, transcript_id, speaker, speaker_role, claim_text,
                metric, metric_type, stated_value, unit,
                comparison_period, comparison_basis, is_gaap, segment,
                confidence, context_snippet
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                       ?13, ?14, ?15)",
            params![
                &id_bytes,
                claim.transcript_id.0,
                &claim.speaker,
                &claim.speaker_role,
                &claim.claim_text,
                &claim.metric,
                claim.metric_type.as_str(),
                claim.stated_value,
                claim.unit.as_str(),
                claim.comparison_period.as_str(),
                &claim.comparison_basis,
                claim.is_gaap,
                &claim.segment,
                claim.confidence,
                &claim.context_snippet,
            ],
        )?;
        Ok(())
    }

    fn row_to_claim(row: &Row<'_>) -> rusqlite::Result<Claim> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let id = Self::bytes_to_claim_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Blob,
                Box::new(e),
            )
        })?;

        let metric_type_str: String = row.get(6)?;
        let unit_str: String = row.get(8)?;
        let comparison_str: String = row.get(9)?;

        Ok(Claim {
            id,
            transcript_id: TranscriptId(row.get(1)?),
            speaker: row.get(2)?,
            speaker_role: row.get(3)?,
            claim_text: row.get(4)?,
            metric: row.get(5)?,
            metric_type: MetricType::parse(&metric_type_str).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    6,
                    rusqlite::types::Type::Text,
                    format!("unknown metric type {}", metric_type_str).into(),
                )
            })?,
            stated_value: row.get(7)?,
            unit: Unit::parse(&unit_str).ok_or_else(|| {
                rusqlite::Error::FromSqlConversionFailure(
                    8,
                    rusqlite::types::Type::Text,
                    format!("unknown unit {}", unit_str).into(),
                )
            })?,
            comparison_period: ComparisonPeriod::parse(&comparison_str).ok_or_else(
                || {
                    rusqlite::Error::FromSqlConversionFailure(
                        9,
                        rusqlite::types::Type::Text,
                        format!("unknown comparison period {}", comparison_str).into(),
                    )
                },
            )?,
            comparison_basis: row.get(10)?,
            is_gaap: row.get(11)?,
            segment: row.get(12)?,
            confidence: row.get(13)?,
            context_snippet: row.get(14)?,
        })
    }

    const CLAIM_COLUMNS: &'static str = "c.id, c.transcript_id, c.speaker, \
        c.speaker_role, c.claim_text, c.metric, c.metric_type, c.stated_value, \
        c.unit, c.comparison_period, c.comparison_basis, c.is_gaap, c.segment, \
        c.confidence, c.context_snippet";

    /// Claims that have no verification result yet, oldest first
    pub fn unverified_claims(&self) -> Result<Vec<UnverifiedClaim>, StoreError> {
        let sql = format!(
            "SELECT {}, t.company_id, t.year, t.quarter
             FROM claims c
             JOIN transcripts t ON t.id = c.transcript_id
             LEFT JOIN verifications v ON v.claim_id = c.id
             WHERE v.id IS NULL
             ORDER BY c.id",
            Self::CLAIM_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let claims = stmt
            .query_map([], |row| {
                let claim = Self::row_to_claim(row)?;
                Ok(UnverifiedClaim {
                    claim,
                    company_id: CompanyId(row.get(15)?),
                    period: FiscalPeriod { year: row.get(16)?, quarter: row.get(17)? },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(claims)
    }

    // ── verifications ────────────────────────────────────────────────

    /// Persist a verification result for a claim
    ///
    /// First-write-wins: returns `false` without modifying anything if
    /// the claim already has a result, so re-running verification is a
    /// no-op.
    pub fn insert_verification(
        &mut self,
        result: &VerificationResult,
    ) -> Result<bool, StoreError> {
        let id_bytes = Self::claim_id_to_bytes(result.claim_id);
        let flags_json = Self::flags_to_json(&result.misleading_flags)?;
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO verifications (
                claim_id, actual_value, accuracy_score, verdict, explanation,
                data_source, record_year, record_quarter,
                comparison_year, comparison_quarter,
                misleading_flags, misleading_details
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                &id_bytes,
                result.actual_value,
                result.accuracy_score,
                result.verdict.as_str(),
                &result.explanation,
                &result.data_source,
                result.record_period.map(|p| p.year),
                result.record_period.map(|p| p.quarter),
                result.comparison_record_period.map(|p| p.year),
                result.comparison_record_period.map(|p| p.quarter),
                flags_json,
                &result.misleading_details,
            ],
        )?;
        Ok(changed == 1)
    }

    fn row_to_verification(row: &Row<'_>) -> rusqlite::Result<VerificationResult> {
        let id_bytes: Vec<u8> = row.get(0)?;
        let claim_id = Self::bytes_to_claim_id(&id_bytes).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Blob,
                Box::new(e),
            )
        })?;

        let verdict_str: String = row.get(3)?;
        let verdict = Verdict::parse(&verdict_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                format!("unknown verdict {}", verdict_str).into(),
            )
        })?;

        let flags_json: String = row.get(10)?;
        let misleading_flags = Self::json_to_flags(&flags_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                10,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })?;

        let record_year: Option<i32> = row.get(6)?;
        let record_quarter: Option<u8> = row.get(7)?;
        let comparison_year: Option<i32> = row.get(8)?;
        let comparison_quarter: Option<u8> = row.get(9)?;

        Ok(VerificationResult {
            claim_id,
            actual_value: row.get(1)?,
            accuracy_score: row.get(2)?,
            verdict,
            explanation: row.get(4)?,
            data_source: row.get(5)?,
            record_period: match (record_year, record_quarter) {
                (Some(year), Some(quarter)) => Some(FiscalPeriod { year, quarter }),
                _ => None,
            },
            comparison_record_period: match (comparison_year, comparison_quarter) {
                (Some(year), Some(quarter)) => Some(FiscalPeriod { year, quarter }),
                _ => None,
            },
            misleading_flags,
            misleading_details: row.get(11)?,
        })
    }

    const VERIFICATION_COLUMNS: &'static str = "v.claim_id, v.actual_value, \
        v.accuracy_score, v.verdict, v.explanation, v.data_source, v.record_year, \
        v.record_quarter, v.comparison_year, v.comparison_quarter, \
        v.misleading_flags, v.misleading_details";

    /// Fetch the verification result for a claim, if one exists
    pub fn get_verification(
        &self,
        claim_id: ClaimId,
    ) -> Result<Option<VerificationResult>, StoreError> {
        let id_bytes = Self::claim_id_to_bytes(claim_id);
        let sql = format!(
            "SELECT {} FROM verifications v WHERE v.claim_id = ?1",
            Self::VERIFICATION_COLUMNS
        );
        let result = self
            .conn
            .query_row(&sql, params![&id_bytes], Self::row_to_verification)
            .optional()?;
        Ok(result)
    }

    /// A company's claims with their verifications, grouped by quarter
    pub fn claims_by_quarter(
        &self,
        company: CompanyId,
    ) -> Result<BTreeMap<FiscalPeriod, Vec<VerifiedClaim>>, StoreError> {
        let sql = format!(
            "SELECT {}, t.year, t.quarter, v.id
             FROM claims c
             JOIN transcripts t ON t.id = c.transcript_id
             LEFT JOIN verifications v ON v.claim_id = c.id
             WHERE t.company_id = ?1
             ORDER BY t.year, t.quarter, c.id",
            Self::CLAIM_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![company.0], |row| {
                let claim = Self::row_to_claim(row)?;
                let period =
                    FiscalPeriod { year: row.get(15)?, quarter: row.get(16)? };
                let has_verification: Option<i64> = row.get(17)?;
                Ok((claim, period, has_verification.is_some()))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut grouped: BTreeMap<FiscalPeriod, Vec<VerifiedClaim>> = BTreeMap::new();
        for (claim, period, has_verification) in rows {
            let verification = if has_verification {
                self.get_verification(claim.id)?
            } else {
                None
            };
            grouped
                .entry(period)
                .or_default()
                .push(VerifiedClaim { claim, verification });
        }
        Ok(grouped)
    }
}

impl FinancialRecordStore for SqliteStore {
    type Error = StoreError;

    fn get_record(
        &self,
        company: CompanyId,
        period: FiscalPeriod,
    ) -> Result<Option<FinancialRecord>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM financial_data
             WHERE company_id = ?1 AND year = ?2 AND quarter = ?3",
            Self::FINANCIAL_COLUMNS
        );
        let record = self
            .conn
            .query_row(
                &sql,
                params![company.0, period.year, period.quarter],
                Self::row_to_financial_record,
            )
            .optional()?;
        Ok(record)
    }
}

impl PatternStore for SqliteStore {
    type Error = StoreError;

    fn replace_patterns(
        &mut self,
        company: CompanyId,
        patterns: &[DiscrepancyPattern],
    ) -> Result<(), Self::Error> {
        // Delete-then-insert inside one transaction so readers never see
        // a partially-replaced set and a failure leaves the old set intact
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM discrepancy_patterns WHERE company_id = ?1",
            params![company.0],
        )?;
        for pattern in patterns {
            let quarters_json = Self::strings_to_json(&pattern.affected_quarters)?;
            let evidence_json = Self::strings_to_json(&pattern.evidence)?;
            tx.execute(
                "INSERT INTO discrepancy_patterns (
                    company_id, pattern_type, description,
                    affected_quarters, severity, evidence
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    company.0,
                    pattern.pattern_type.as_str(),
                    &pattern.description,
                    quarters_json,
                    pattern.severity,
                    evidence_json,
                ],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_patterns(
        &self,
        company: CompanyId,
    ) -> Result<Vec<DiscrepancyPattern>, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT pattern_type, description, affected_quarters, severity, evidence
             FROM discrepancy_patterns WHERE company_id = ?1 ORDER BY id",
        )?;
        let patterns = stmt
            .query_map(params![company.0], |row| {
                let type_str: String = row.get(0)?;
                let pattern_type = PatternType::parse(&type_str).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        format!("unknown pattern type {}", type_str).into(),
                    )
                })?;
                let quarters_json: String = row.get(2)?;
                let evidence_json: String = row.get(4)?;
                let affected_quarters =
                    Self::json_to_strings(&quarters_json).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            2,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                let evidence = Self::json_to_strings(&evidence_json).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        4,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(DiscrepancyPattern {
                    pattern_type,
                    description: row.get(1)?,
                    affected_quarters,
                    severity: row.get(3)?,
                    evidence,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(patterns)
    }
}

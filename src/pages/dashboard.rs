use crate::dashboard::{DashboardApi, DashboardSummary, Reports, ReportsApi};
use crate::error::Result;

use super::Loadable;

pub struct DashboardPage {
    api: DashboardApi,
    summary: Loadable<DashboardSummary>,
}

impl DashboardPage {
    pub fn new(api: DashboardApi) -> Self {
        Self {
            api,
            summary: Loadable::default(),
        }
    }

    pub fn summary(&self) -> &Loadable<DashboardSummary> {
        &self.summary
    }

    pub async fn reload(&mut self) -> Result<()> {
        self.summary.begin();
        let result = self.api.summary().await;
        self.summary.finish(result)
    }
}

pub struct ReportsPage {
    api: ReportsApi,
    reports: Loadable<Reports>,
}

impl ReportsPage {
    pub fn new(api: ReportsApi) -> Self {
        Self {
            api,
            reports: Loadable::default(),
        }
    }

    pub fn reports(&self) -> &Loadable<Reports> {
        &self.reports
    }

    pub async fn reload(&mut self) -> Result<()> {
        self.reports.begin();
        let result = self.api.get().await;
        self.reports.finish(result)
    }
}

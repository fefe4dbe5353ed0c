//! Runner for the prune workflow
//!
//! Drives the whole run in order: validate configuration, authenticate,
//! list tags, build the prune plan, delete expired tags, report the kept
//! set. Strictly sequential; every registry call completes or fails before
//! the next one starts.

use crate::cli::args::Args;
use crate::config::{AuthConfig, PruneConfig, RegistryConfig};
use crate::error::{PrunerError, Result};
use crate::output::OutputManager;
use crate::prune::{self, PrunePlan};
use crate::registry::{RegistryClient, RegistryClientBuilder};

pub struct Runner {
    args: Args,
    output: OutputManager,
}

impl Runner {
    pub fn new(args: Args) -> Result<Self> {
        let output = if args.quiet {
            OutputManager::new_quiet()
        } else {
            OutputManager::new(args.verbose)
        };

        Ok(Self { args, output })
    }

    pub async fn run(&self) -> Result<()> {
        self.output.section("Docker Tag Pruner");

        let (auth_config, registry_config, prune_config) = self.build_configs()?;

        self.output.info(&format!(
            "Pruning {} down to the {} most recently updated tag(s)",
            prune_config.repository, prune_config.keep
        ));
        if self.args.dry_run {
            self.output.warning("Dry run mode - no tags will be deleted");
        }

        let mut client = RegistryClientBuilder::from_config(&registry_config).build()?;

        self.output.step("Authenticating with registry");
        client.authenticate(&auth_config, &self.output).await?;

        self.output.step("Listing repository tags");
        let tags = client
            .list_tags(&prune_config.repository, &self.output)
            .await?;
        self.output
            .info(&format!("Found {} tag(s) in {}", tags.len(), prune_config.repository));

        let plan = prune::plan(tags, prune_config.keep)?;

        let failures = if plan.is_noop() {
            self.output.info("Tag count is within the retention window - nothing to delete");
            Vec::new()
        } else {
            self.delete_expired(&client, &prune_config, &plan).await?
        };

        self.report(&prune_config.repository, &plan);

        if !failures.is_empty() {
            return Err(PrunerError::Registry(format!(
                "{} of {} deletions failed",
                failures.len(),
                plan.expired.len()
            )));
        }

        self.output.success(&format!(
            "Prune completed in {}",
            self.output.elapsed_time()
        ));

        Ok(())
    }

    /// Construct and validate the run configuration from arguments and
    /// environment-provided credentials. All failures here are fatal
    /// configuration errors raised before any network call.
    fn build_configs(&self) -> Result<(AuthConfig, RegistryConfig, PruneConfig)> {
        let username = self.args.username.clone().ok_or_else(|| {
            PrunerError::Configuration(
                "Missing username: pass --username or set DOCKER_USERNAME".to_string(),
            )
        })?;
        let password = self.args.password.clone().ok_or_else(|| {
            PrunerError::Configuration(
                "Missing password: pass --password or set DOCKER_PASSWORD".to_string(),
            )
        })?;

        let auth_config = AuthConfig::new(username, password);
        auth_config.validate()?;

        let registry_config = RegistryConfig::new(self.args.registry_url.clone())
            .with_timeout(self.args.timeout)
            .with_page_size(self.args.page_size);
        registry_config.validate()?;

        let prune_config = PruneConfig::new(self.args.repository.clone(), self.args.keep);
        prune_config.validate()?;

        Ok((auth_config, registry_config, prune_config))
    }

    /// Delete every expired tag in plan order. The default policy aborts on
    /// the first failure, leaving the repository partially pruned; with
    /// `--keep-going` the remaining deletions still run and the collected
    /// failures are returned for the caller to surface.
    async fn delete_expired(
        &self,
        client: &RegistryClient,
        config: &PruneConfig,
        plan: &PrunePlan,
    ) -> Result<Vec<PrunerError>> {
        self.output.info(&format!(
            "{} tag(s) fall outside the retention window",
            plan.expired.len()
        ));

        let mut failures: Vec<PrunerError> = Vec::new();

        for (i, tag) in plan.expired.iter().enumerate() {
            if self.args.dry_run {
                self.output.info(&format!(
                    "Would delete tag {}/{}: {}",
                    i + 1,
                    plan.expired.len(),
                    tag.name
                ));
                continue;
            }

            self.output.verbose(&format!(
                "Deleting tag {}/{}: {}",
                i + 1,
                plan.expired.len(),
                tag.name
            ));

            match client.delete_tag(&config.repository, &tag.name, &self.output).await {
                Ok(()) => {}
                Err(e) if self.args.keep_going => {
                    self.output.warning(&e.to_string());
                    failures.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(failures)
    }

    /// Print the kept-tags report to stdout, most-recent-first. This is the
    /// tool's product output and prints regardless of verbosity settings.
    fn report(&self, repository: &str, plan: &PrunePlan) {
        if self.args.dry_run {
            println!("The following tags would be kept in {}:", repository);
        } else {
            println!("The following tags were kept in {}:", repository);
        }
        for tag in &plan.kept {
            println!("{}", tag.name);
        }
    }
}

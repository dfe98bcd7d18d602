use std::time::{Duration, Instant};

use deadpool::{
	Runtime,
	managed::{self, Metrics, Pool, RecycleError, RecycleResult},
};
use ldap3::{
	Ldap, LdapConnAsync, LdapConnSettings, LdapError, Scope, SearchEntry,
	adapters::{Adapter, EntriesOnly, PagedResults},
};

use hsa_domain::DirectoryEntry;

use crate::{BoxFuture, Directory, Error, Result, SearchRequest, SearchScope};

struct Credentials {
	dn: String,
	password: String,
}

/// Opens and binds LDAP connections for the pool.
pub struct LdapManager {
	url: String,
	credentials: Option<Credentials>,
	connect_timeout: Duration,
}
impl LdapManager {
	pub fn new(cfg: &hsa_config::Directory) -> Self {
		let credentials = match (&cfg.bind_dn, &cfg.bind_password) {
			(Some(dn), Some(password)) =>
				Some(Credentials { dn: dn.clone(), password: password.clone() }),
			_ => None,
		};

		Self {
			url: cfg.url.clone(),
			credentials,
			connect_timeout: Duration::from_millis(cfg.connect_timeout_ms),
		}
	}
}
impl managed::Manager for LdapManager {
	type Error = LdapError;
	type Type = Ldap;

	async fn create(&self) -> Result<Ldap, LdapError> {
		let settings = LdapConnSettings::new().set_conn_timeout(self.connect_timeout);
		let (conn, mut ldap) = LdapConnAsync::with_settings(settings, &self.url).await?;

		tokio::spawn(async move {
			if let Err(err) = conn.drive().await {
				tracing::warn!(error = %err, "LDAP connection closed with an error.");
			}
		});

		if let Some(credentials) = &self.credentials {
			ldap.simple_bind(&credentials.dn, &credentials.password).await?.success()?;
		}

		tracing::debug!(url = %self.url, "Opened directory connection.");

		Ok(ldap)
	}

	async fn recycle(&self, ldap: &mut Ldap, _: &Metrics) -> RecycleResult<LdapError> {
		if ldap.is_closed() {
			tracing::warn!(url = %self.url, "Discarding closed directory connection.");

			return Err(RecycleError::Message("Connection is closed.".into()));
		}

		Ok(())
	}
}

/// Directory backed by an LDAP server through a bounded connection pool.
pub struct LdapDirectory {
	pool: Pool<LdapManager>,
	page_size: i32,
	search_timeout: Duration,
}
impl LdapDirectory {
	/// Builds the pool. Connections are opened lazily on first use.
	pub fn connect(cfg: &hsa_config::Directory) -> Result<Self> {
		let pool = Pool::builder(LdapManager::new(cfg))
			.max_size(cfg.pool_max_conns)
			.wait_timeout(Some(Duration::from_millis(cfg.pool_wait_timeout_ms)))
			.create_timeout(Some(Duration::from_millis(cfg.connect_timeout_ms)))
			.runtime(Runtime::Tokio1)
			.build()
			.map_err(|err| Error::Pool { message: err.to_string() })?;

		Ok(Self {
			pool,
			page_size: cfg.page_size,
			search_timeout: Duration::from_millis(cfg.search_timeout_ms),
		})
	}

	async fn search_paged(&self, request: &SearchRequest) -> Result<Vec<DirectoryEntry>> {
		let mut ldap = self.pool.get().await?;
		let filter = request.filter.to_string();
		let started = Instant::now();

		tracing::debug!(
			base = %request.base,
			scope = ?request.scope,
			filter = %filter,
			"Searching directory."
		);

		let adapters: Vec<Box<dyn Adapter<_, _>>> =
			vec![Box::new(EntriesOnly::new()), Box::new(PagedResults::new(self.page_size))];
		let mut stream = ldap
			.with_timeout(self.search_timeout)
			.streaming_search_with(
				adapters,
				&request.base,
				ldap_scope(request.scope),
				&filter,
				request.attributes.clone(),
			)
			.await?;
		let mut entries = Vec::new();

		while let Some(raw) = stream.next().await? {
			let entry = SearchEntry::construct(raw);

			entries.push(DirectoryEntry { dn: entry.dn, attributes: entry.attrs.into_iter().collect() });
		}

		stream.finish().await.success()?;

		let status = self.pool.status();

		tracing::debug!(
			entries = entries.len(),
			elapsed_ms = started.elapsed().as_millis() as u64,
			pool_size = status.size,
			pool_available = status.available,
			"Directory search finished."
		);

		Ok(entries)
	}
}
impl Directory for LdapDirectory {
	fn search<'a>(
		&'a self,
		request: &'a SearchRequest,
	) -> BoxFuture<'a, Result<Vec<DirectoryEntry>>> {
		Box::pin(self.search_paged(request))
	}
}

fn ldap_scope(scope: SearchScope) -> Scope {
	match scope {
		SearchScope::Base => Scope::Base,
		SearchScope::OneLevel => Scope::OneLevel,
		SearchScope::Subtree => Scope::Subtree,
	}
}

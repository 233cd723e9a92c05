// Account endpoints

use crate::client::ApiClient;
use crate::error::Error;
use crate::model::{Account, AccountDetail};

impl ApiClient {
    /// `GET /accounts`
    pub async fn list_accounts(&self) -> Result<Vec<Account>, Error> {
        self.get("accounts").await
    }

    /// `GET /accounts/{id}`
    ///
    /// The server joins the account with its transactions and
    /// violations; in demo mode the same shape is assembled client-side.
    pub async fn account_detail(&self, account_id: &str) -> Result<AccountDetail, Error> {
        self.get(&format!("accounts/{account_id}")).await
    }
}

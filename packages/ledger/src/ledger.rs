// Lock-scoped debt ledger
//
// Sign convention: a positive debt means the locker owes the ledger, a
// negative debt means the ledger owes the locker. Every map is keyed by lock
// id so that nested locks never see each other's entries.

use riptide_types::RiptideError;
use soroban_sdk::{Address, Env, Map, Vec};

/// An open accounting context
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Lock {
    pub id: u64,
    /// 0 for the outermost lock
    pub depth: u32,
}

#[derive(Clone)]
pub struct Ledger {
    env: Env,
    next_id: u64,
    stack: Vec<u64>,
    debts: Map<(u64, Address), i128>,
    nonzero: Map<u64, u32>,
    payments: Map<(u64, Address), u128>,
}

impl Ledger {
    pub fn new(env: &Env) -> Self {
        Self::resume(env, 0)
    }

    /// Ledger whose first lock gets `next_id`, so ids keep increasing across
    /// invocations that persist the counter
    pub fn resume(env: &Env, next_id: u64) -> Self {
        Self {
            env: env.clone(),
            next_id,
            stack: Vec::new(env),
            debts: Map::new(env),
            nonzero: Map::new(env),
            payments: Map::new(env),
        }
    }

    /// Id the next opened lock will receive
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    // ========================================================
    // LOCK LIFECYCLE
    // ========================================================

    pub fn open_lock(&mut self) -> Result<Lock, RiptideError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(RiptideError::LockIdOverflow)?;

        let depth = self.stack.len();
        self.stack.push_back(id);
        Ok(Lock { id, depth })
    }

    /// Close the innermost lock
    ///
    /// Fails with `DebtsNotZeroed` while any debt of the lock is nonzero.
    /// Payment snapshots the lock left open are discarded.
    pub fn close_lock(&mut self, id: u64) -> Result<(), RiptideError> {
        self.ensure_innermost(id)?;

        if self.nonzero_debts(id) != 0 {
            return Err(RiptideError::DebtsNotZeroed);
        }

        self.stack.pop_back();
        self.nonzero.remove(id);

        let open = self.payments.clone();
        for ((lock_id, token), _) in open.iter() {
            if lock_id == id {
                self.payments.remove((lock_id, token));
            }
        }
        Ok(())
    }

    /// Run `f` inside a fresh lock and close it afterwards
    ///
    /// When the outermost lock fails, the ledger is restored to the state it
    /// had before the lock opened, except for the id counter. A nested lock
    /// that fails is left open, so the enclosing lock can no longer close and
    /// the error has to propagate.
    pub fn lock<T, F>(&mut self, f: F) -> Result<T, RiptideError>
    where
        F: FnOnce(&mut Ledger, Lock) -> Result<T, RiptideError>,
    {
        let checkpoint = if self.stack.is_empty() {
            Some(self.clone())
        } else {
            None
        };

        let lock = self.open_lock()?;
        let result = f(self, lock).and_then(|value| {
            self.close_lock(lock.id)?;
            Ok(value)
        });

        if result.is_err() {
            if let Some(mut restored) = checkpoint {
                restored.next_id = self.next_id;
                *self = restored;
            }
        }
        result
    }

    pub fn current_lock(&self) -> Option<Lock> {
        let depth = self.stack.len().checked_sub(1)?;
        self.stack.last().map(|id| Lock { id, depth })
    }

    pub fn depth(&self) -> u32 {
        self.stack.len()
    }

    fn ensure_innermost(&self, id: u64) -> Result<(), RiptideError> {
        match self.stack.last() {
            None => Err(RiptideError::NoActiveLock),
            Some(innermost) if innermost != id => Err(RiptideError::NotInnermostLock),
            Some(_) => Ok(()),
        }
    }

    // ========================================================
    // DEBTS
    // ========================================================

    pub fn debt(&self, id: u64, token: &Address) -> i128 {
        self.debts.get((id, token.clone())).unwrap_or(0)
    }

    /// Number of nonzero debt entries of a lock
    pub fn nonzero_debts(&self, id: u64) -> u32 {
        self.nonzero.get(id).unwrap_or(0)
    }

    /// Signed add to a debt entry. Returns the new debt.
    pub fn account_debt(&mut self, id: u64, token: &Address, delta: i128) -> Result<i128, RiptideError> {
        self.ensure_innermost(id)?;

        let key = (id, token.clone());
        let before = self.debts.get(key.clone()).unwrap_or(0);
        let after = before.checked_add(delta).ok_or(RiptideError::DebtOverflow)?;

        if after == 0 {
            self.debts.remove(key);
        } else {
            self.debts.set(key, after);
        }

        self.update_nonzero(id, before == 0, after == 0)?;
        Ok(after)
    }

    /// The locker took `amount` from the ledger
    pub fn record_debit(&mut self, id: u64, token: &Address, amount: i128) -> Result<i128, RiptideError> {
        if amount < 0 {
            return Err(RiptideError::InvalidAmount);
        }
        self.account_debt(id, token, amount)
    }

    /// The locker gave `amount` to the ledger
    pub fn record_credit(&mut self, id: u64, token: &Address, amount: i128) -> Result<i128, RiptideError> {
        if amount < 0 {
            return Err(RiptideError::InvalidAmount);
        }
        self.account_debt(id, token, -amount)
    }

    /// Record `amount` of `token` leaving the ledger for the locker
    ///
    /// Open payment snapshots of the token are lowered by the same amount so
    /// the outflow is not mistaken for a missing payment.
    pub fn withdraw(&mut self, id: u64, token: &Address, amount: i128) -> Result<i128, RiptideError> {
        let debt = self.record_debit(id, token, amount)?;
        self.shift_snapshots(token, amount.unsigned_abs(), false)?;
        Ok(debt)
    }

    fn update_nonzero(&mut self, id: u64, was_zero: bool, is_zero: bool) -> Result<(), RiptideError> {
        let count = self.nonzero_debts(id);
        let updated = match (was_zero, is_zero) {
            (true, false) => count.checked_add(1),
            (false, true) => count.checked_sub(1),
            _ => return Ok(()),
        }
        .ok_or(RiptideError::Overflow)?;

        if updated == 0 {
            self.nonzero.remove(id);
        } else {
            self.nonzero.set(id, updated);
        }
        Ok(())
    }

    // ========================================================
    // TWO-PHASE PAYMENTS
    // ========================================================

    /// Snapshot the ledger's balance of each token for the innermost lock
    pub fn start_payments(
        &mut self,
        id: u64,
        tokens: &Vec<Address>,
        balance_of: impl Fn(&Address) -> u128,
    ) -> Result<(), RiptideError> {
        self.ensure_innermost(id)?;

        for token in tokens.iter() {
            let balance = balance_of(&token);
            self.payments.set((id, token), balance);
        }
        Ok(())
    }

    /// Credit each token by how much the balance grew since its snapshot
    ///
    /// Returns the credited amounts in `tokens` order. A token without an
    /// open snapshot for this lock is credited zero.
    pub fn complete_payments(
        &mut self,
        id: u64,
        tokens: &Vec<Address>,
        balance_of: impl Fn(&Address) -> u128,
    ) -> Result<Vec<i128>, RiptideError> {
        self.ensure_innermost(id)?;

        let mut credited = Vec::new(&self.env);
        for token in tokens.iter() {
            let key = (id, token.clone());
            let Some(snapshot) = self.payments.get(key.clone()) else {
                credited.push_back(0);
                continue;
            };
            self.payments.remove(key);

            let paid = balance_of(&token)
                .checked_sub(snapshot)
                .ok_or(RiptideError::PaymentOverflow)?;
            let paid_signed = i128::try_from(paid).map_err(|_| RiptideError::PaymentOverflow)?;

            self.account_debt(id, &token, -paid_signed)?;
            self.shift_snapshots(&token, paid, true)?;
            credited.push_back(paid_signed);
        }
        Ok(credited)
    }

    pub fn payment_snapshot(&self, id: u64, token: &Address) -> Option<u128> {
        self.payments.get((id, token.clone()))
    }

    /// Move every open snapshot of `token` up (inflow already credited) or
    /// down (outflow), floored at zero
    fn shift_snapshots(&mut self, token: &Address, amount: u128, up: bool) -> Result<(), RiptideError> {
        if amount == 0 {
            return Ok(());
        }

        let open = self.payments.clone();
        for ((lock_id, snapshot_token), snapshot) in open.iter() {
            if snapshot_token != *token {
                continue;
            }
            let shifted = if up {
                snapshot.checked_add(amount).ok_or(RiptideError::PaymentOverflow)?
            } else {
                snapshot.saturating_sub(amount)
            };
            self.payments.set((lock_id, snapshot_token), shifted);
        }
        Ok(())
    }
}

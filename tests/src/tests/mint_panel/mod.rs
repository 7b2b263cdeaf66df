mod panel_against_contract;
